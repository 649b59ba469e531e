//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;
use crate::theme::THEME_NAMES;

impl Config {
    /// Render the config as a commented TOML document
    pub fn to_toml(&self) -> String {
        format!(
            r#"# adsreport configuration

# Reports API endpoint (ADSREPORT_GATEWAY_URL overrides)
gateway_url = "{gateway_url}"

# Bind address for `adsreport serve` (ADSREPORT_BIND overrides)
bind_addr = "{bind}"

# Theme: {themes}
theme = "{theme}"

# Simulated latency of the in-process demo backend (--demo)
demo_latency_ms = {latency}

# Report table viewport, in terminal cells
[table]
width = {table_width}
height = {table_height}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to TUI buffer or stdout)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            gateway_url = self.gateway_url,
            bind = self.bind_addr,
            themes = THEME_NAMES.join(", "),
            theme = self.theme,
            latency = self.demo_latency_ms,
            table_width = self.table.width,
            table_height = self.table.height,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
