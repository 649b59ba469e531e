//! `[logging]` section of the config file

use serde::Deserialize;
use std::path::PathBuf;

/// How often the JSON log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// Keep appending to one file
    Never,
}

impl LogRotation {
    /// Case-insensitive; unknown values roll daily
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

/// Effective logging settings
///
/// `level` seeds the `EnvFilter` when `RUST_LOG` is unset. File output is
/// off by default; the TUI log panel or stdout always receives events.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name stem, `adsreport` rolls to `adsreport.2024-01-15`
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::default(),
            file_prefix: "adsreport".into(),
        }
    }
}

/// `[logging]` as written in the file; every key optional
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Overlay whatever the file set onto the defaults
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let Some(file) = file else {
            return Self::default();
        };
        let mut config = Self::default();

        if let Some(level) = file.level {
            config.level = level;
        }
        if let Some(enabled) = file.file_enabled {
            config.file_enabled = enabled;
        }
        if let Some(dir) = file.file_dir {
            config.file_dir = PathBuf::from(dir);
        }
        if let Some(rotation) = file.file_rotation {
            config.file_rotation = LogRotation::parse(&rotation);
        }
        if let Some(prefix) = file.file_prefix {
            config.file_prefix = prefix;
        }
        config
    }
}
