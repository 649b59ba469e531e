//! Report table viewport configuration

use serde::Deserialize;

/// Upper bound of the report table viewport, in terminal cells
///
/// The table never grows beyond this; smaller terminals shrink it further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub width: u16,
    pub height: u16,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            width: 160,
            height: 20,
        }
    }
}

/// Table settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileTable {
    pub width: Option<u16>,
    pub height: Option<u16>,
}

impl TableConfig {
    /// Create from file config with defaults; zero sizes are treated as unset
    pub fn from_file(file: Option<FileTable>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            width: file.width.filter(|w| *w > 0).unwrap_or(defaults.width),
            height: file.height.filter(|h| *h > 0).unwrap_or(defaults.height),
        }
    }
}
