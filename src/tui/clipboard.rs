//! Clipboard helper
//!
//! Uses `arboard` for cross-platform support. The clipboard is opened per
//! copy so nothing is held between operations.

use anyhow::{Context, Result};
use arboard::Clipboard;
use serde::Serialize;

/// Copy text to the system clipboard
///
/// Fails when there is no display server (headless Linux) or access is denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

/// Pretty-printed JSON of `value`, as copied by `y`
pub fn to_clipboard_json(value: &impl Serialize) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize for clipboard")
}
