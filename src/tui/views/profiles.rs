// Profiles screen: the selectable profile list

use crate::tui::app::{App, Focus};
use ratatui::{layout::Rect, Frame};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    app.profiles_panel.render(
        f,
        area,
        app.profiles.profiles(),
        app.profiles.is_loaded(),
        &app.theme,
        app.focused == Focus::Profiles,
    );
}
