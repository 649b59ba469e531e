// Views module - screen-level rendering
//
// The shell (title, logs, status) is the same on every screen; the content
// slot in between shows the current screen:
// - Reports: request form and report table
// - Profiles: profile list

mod modal;
mod profiles;
mod reports;

use super::app::{App, Screen};
use crate::tui::components::{logs_panel, status_bar, title_bar};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Screen content
            Constraint::Length(8), // Logs
            Constraint::Length(2), // Status
        ])
        .split(f.area());

    title_bar::render(f, chunks[0], app);
    match app.screen {
        Screen::Reports => reports::render(f, chunks[1], app),
        Screen::Profiles => profiles::render(f, chunks[1], app),
    }
    logs_panel::render(f, chunks[2], app);
    status_bar::render(f, chunks[3], app);

    // Take modal temporarily to avoid borrow conflict with mutable app
    if let Some(modal_state) = app.modal.take() {
        modal::render(f, &modal_state, app);
        app.modal = Some(modal_state);
    }

    // Toast goes on top of the modal too
    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }

    app.clear_expired_toast();
}
