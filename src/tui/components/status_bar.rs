// Status bar component
//
// Uptime, session, report count and calls in flight, plus the focused
// panel's key hint when there is room.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);
    let reports = app.reports.reports().len();
    let in_flight = app.reports.in_flight();

    let status_text = if !bp.at_least(Breakpoint::Normal) {
        format!(" {} │ 📄 {} │ ⏳ {}", app.uptime(), reports, in_flight)
    } else {
        let mut text = format!(
            " {} │ session {} │ 📄 {} reports │ ⏳ {} in flight",
            app.uptime(),
            app.session(),
            reports,
            in_flight
        );
        if bp.at_least(Breakpoint::Wide) {
            if let Some(hint) = app.focus_hint() {
                text.push_str(" │ ");
                text.push_str(hint);
            }
        }
        text
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
