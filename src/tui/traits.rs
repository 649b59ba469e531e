//! Keyboard routing contract for focusable panels
//!
//! The App routes navigation keys to whichever panel has focus. Panels own
//! their view state (selection, scroll) and report whether they used a key;
//! anything they pass on bubbles back to the App.

use crossterm::event::KeyEvent;

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the panel
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Panels that take keyboard input while focused
pub trait Interactive {
    /// Returns `Handled::Yes` if the panel consumed the event
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Keybind hint shown in the status bar while focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
