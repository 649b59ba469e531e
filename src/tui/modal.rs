// Modal overlays
//
// A modal captures all input while open. It handles its own keys and returns
// an action; the App only holds `Option<Modal>`.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, nothing to do
    None,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Keyboard shortcuts
    Help,
    /// Blocking message the operator must dismiss
    Alert { title: String, message: String },
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn alert(title: impl Into<String>, message: impl Into<String>) -> Self {
        Modal::Alert {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Alert { .. } => match key {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => ModalAction::Close,
                _ => ModalAction::None,
            },
        }
    }
}
