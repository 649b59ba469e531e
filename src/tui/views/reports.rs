// Reports screen: request form beside (or above) the report table

use crate::table::report_table;
use crate::tui::app::{App, Focus};
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Four fields, a spacer, the button, and borders
const FORM_HEIGHT: u16 = 8;
const FORM_WIDTH: u16 = 44;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = if Breakpoint::from_width(area.width).at_least(Breakpoint::Wide) {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(FORM_WIDTH), Constraint::Min(0)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(FORM_HEIGHT), Constraint::Min(0)])
            .split(area)
    };

    app.form_panel.render(
        f,
        chunks[0],
        app.reports.form(),
        &app.theme,
        app.focused == Focus::Form,
    );

    let table = report_table(app.reports.reports());
    app.table_panel.render(
        f,
        chunks[1],
        table.as_ref(),
        &app.table_config,
        &app.theme,
        app.focused == Focus::Table,
    );
}
