//! Configuration for the reports front-end
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/adsreport/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod serialization;
mod table;

#[cfg(test)]
mod tests;

pub use logging::{FileLogging, LogRotation, LoggingConfig};
pub use table::{FileTable, TableConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:5000/reports-api";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_THEME: &str = "dark";
const DEFAULT_DEMO_LATENCY_MS: u64 = 300;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Reports API endpoint the TUI talks to
    pub gateway_url: String,

    /// Address `adsreport serve` binds the demo API to
    pub bind_addr: SocketAddr,

    /// Theme name: "dark", "light", "dracula", "nord", "auto"
    pub theme: String,

    /// Demo mode: talk to an in-process backend instead of `gateway_url`
    pub demo_mode: bool,

    /// Simulated round-trip time of the in-process backend
    pub demo_latency_ms: u64,

    /// Report table viewport
    pub table: TableConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            theme: DEFAULT_THEME.to_string(),
            demo_mode: false,
            demo_latency_ms: DEFAULT_DEMO_LATENCY_MS,
            table: TableConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub gateway_url: Option<String>,
    pub bind_addr: Option<String>,
    pub theme: Option<String>,
    pub demo_latency_ms: Option<u64>,

    /// Optional [table] section
    pub table: Option<FileTable>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/adsreport/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("adsreport").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A file that exists but cannot be read or parsed is an error: a broken
    /// config should fail fast instead of silently falling back to defaults.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| {
                format!(
                    "Failed to parse {} (check quoting, true/false values and section names; \
                     run `adsreport config --reset` to start over)",
                    path.display()
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Cannot read config file {}", path.display()))
            }
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Gateway URL: env > file > default
        let gateway_url = env("ADSREPORT_GATEWAY_URL")
            .or(file.gateway_url)
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());

        // Bind address: env > file > default
        let bind = env("ADSREPORT_BIND")
            .or(file.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse()
            .with_context(|| format!("Invalid bind address: {}", bind))?;

        // Theme: env > file > default
        let theme = env("ADSREPORT_THEME")
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        // Demo mode: env only (runtime flag)
        let demo_mode = env("ADSREPORT_DEMO")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let demo_latency_ms = file.demo_latency_ms.unwrap_or(DEFAULT_DEMO_LATENCY_MS);

        let table = TableConfig::from_file(file.table);
        let logging = LoggingConfig::from_file(file.logging);

        Ok(Self {
            gateway_url,
            bind_addr,
            theme,
            demo_mode,
            demo_latency_ms,
            table,
            logging,
        })
    }
}
