// Title bar component
//
// App name, an activity spinner while gateway calls are outstanding, and the
// active profile (or what the current screen is for).

use crate::tui::app::{App, Screen};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let activity = if app.reports.in_flight() > 0 {
        format!(" {} loading", app.spinner_char())
    } else {
        String::new()
    };

    let context = match app.screen {
        Screen::Reports if app.reports.profile_name().is_empty() => {
            "no profile selected (p to choose)"
        }
        Screen::Reports => app.reports.profile_name(),
        Screen::Profiles => "Select a profile",
    };

    let title_text = format!(" 📊 Ads Reports{} ──── {}", activity, context);

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(Line::from(" ? ").right_aligned()),
        );

    f.render_widget(title, area);
}
