//! Configuration tests

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).expect("valid TOML")
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that the serialized default config parses back to the same values.
#[test]
fn test_config_roundtrip_default() {
    let toml_str = Config::default().to_toml();
    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let config = Config::from_sources(parsed.unwrap(), no_env).unwrap();
    let defaults = Config::default();
    assert_eq!(config.gateway_url, defaults.gateway_url);
    assert_eq!(config.bind_addr, defaults.bind_addr);
    assert_eq!(config.theme, defaults.theme);
    assert_eq!(config.demo_latency_ms, defaults.demo_latency_ms);
    assert_eq!(config.table, defaults.table);
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
    assert_eq!(config.logging.file_prefix, "adsreport");
}

#[test]
fn test_config_roundtrip_custom() {
    let mut config = Config::default();
    config.gateway_url = "http://reports.internal:8000/reports-api".to_string();
    config.theme = "nord".to_string();
    config.table.width = 90;
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let reparsed = Config::from_sources(parse(&config.to_toml()), no_env).unwrap();
    assert_eq!(reparsed.gateway_url, config.gateway_url);
    assert_eq!(reparsed.theme, "nord");
    assert_eq!(reparsed.table.width, 90);
    assert!(reparsed.logging.file_enabled);
    assert_eq!(reparsed.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    let config = Config::from_sources(FileConfig::default(), no_env).unwrap();
    assert_eq!(config.gateway_url, "http://127.0.0.1:5000/reports-api");
    assert_eq!(config.bind_addr.to_string(), "127.0.0.1:5000");
    assert!(!config.demo_mode);
    assert_eq!(config.table, TableConfig { width: 160, height: 20 });
}

#[test]
fn test_env_overrides_file() {
    let file = parse(
        r#"
gateway_url = "http://file:1/reports-api"
bind_addr = "0.0.0.0:7000"
theme = "light"
"#,
    );
    let env: HashMap<&str, &str> = HashMap::from([
        ("ADSREPORT_GATEWAY_URL", "http://env:2/reports-api"),
        ("ADSREPORT_THEME", "dracula"),
        ("ADSREPORT_DEMO", "true"),
    ]);

    let config =
        Config::from_sources(file, |key| env.get(key).map(|v| v.to_string())).unwrap();

    assert_eq!(config.gateway_url, "http://env:2/reports-api");
    assert_eq!(config.theme, "dracula");
    // No env override: file wins
    assert_eq!(config.bind_addr.to_string(), "0.0.0.0:7000");
    assert!(config.demo_mode);
}

#[test]
fn test_invalid_bind_address_is_an_error() {
    let file = parse(r#"bind_addr = "not-an-address""#);
    let err = Config::from_sources(file, no_env).unwrap_err();
    assert!(err.to_string().contains("not-an-address"));
}

#[test]
fn test_malformed_file_is_rejected() {
    let parsed: Result<FileConfig, _> = toml::from_str("theme = dark");
    assert!(parsed.is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// Section tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_partial_sections_fill_defaults() {
    let file = parse(
        r#"
[table]
height = 8

[logging]
level = "debug"
file_rotation = "weekly"
"#,
    );
    let config = Config::from_sources(file, no_env).unwrap();

    assert_eq!(config.table, TableConfig { width: 160, height: 8 });
    assert_eq!(config.logging.level, "debug");
    // Unknown rotation falls back to daily
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
    assert!(!config.logging.file_enabled);
}

#[test]
fn test_zero_table_size_is_ignored() {
    let table = TableConfig::from_file(Some(FileTable {
        width: Some(0),
        height: Some(0),
    }));
    assert_eq!(table, TableConfig::default());
}
