// CLI module - command-line argument parsing and handlers
//
// The default command runs the TUI. Subcommands:
// - serve: run the demo reports API over HTTP
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Print the config file location

use crate::config::{Config, VERSION};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::net::SocketAddr;

/// adsreport - request and check advertising reports
#[derive(Parser, Debug)]
#[command(name = "adsreport")]
#[command(version = VERSION)]
#[command(about = "Terminal front-end for an advertising reports API", long_about = None)]
pub struct Cli {
    /// Talk to an in-process demo backend instead of the gateway URL
    #[arg(long)]
    pub demo: bool,

    /// Start on the profile selection screen
    #[arg(long)]
    pub profiles: bool,

    /// Reports API endpoint (overrides config and ADSREPORT_GATEWAY_URL)
    #[arg(long, value_name = "URL")]
    pub gateway: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the demo reports API over HTTP
    Serve {
        /// Address to bind (overrides config and ADSREPORT_BIND)
        #[arg(long, value_name = "ADDR")]
        bind: Option<SocketAddr>,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// What `main` should run after argument handling
#[derive(Debug, PartialEq)]
pub enum Action {
    /// Run the TUI
    Tui {
        demo: bool,
        start_on_profiles: bool,
        gateway: Option<String>,
    },
    /// Serve the demo API
    Serve { bind: Option<SocketAddr> },
    /// A command already ran to completion
    Done,
}

/// Parse arguments and run config commands in place
pub fn handle_cli() -> Result<Action> {
    handle(Cli::parse())
}

fn handle(cli: Cli) -> Result<Action> {
    match cli.command {
        Some(Commands::Serve { bind }) => Ok(Action::Serve { bind }),
        Some(Commands::Config { show, reset, path }) => {
            if path {
                handle_config_path()?;
            } else if show {
                handle_config_show()?;
            } else if reset {
                handle_config_reset()?;
            } else {
                println!("Usage: adsreport config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            Ok(Action::Done)
        }
        None => Ok(Action::Tui {
            demo: cli.demo,
            start_on_profiles: cli.profiles,
            gateway: cli.gateway,
        }),
    }
}

fn handle_config_path() -> Result<()> {
    let Some(path) = Config::config_path() else {
        bail!("Could not determine config path");
    };
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());
    if config.demo_mode {
        println!();
        println!("# Demo mode enabled via ADSREPORT_DEMO");
    }

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let Some(path) = Config::config_path() else {
        bail!("Could not determine config path");
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(args: &[&str]) -> Action {
        handle(Cli::try_parse_from(args).unwrap()).unwrap()
    }

    #[test]
    fn default_runs_tui() {
        assert_eq!(
            action(&["adsreport"]),
            Action::Tui {
                demo: false,
                start_on_profiles: false,
                gateway: None
            }
        );
    }

    #[test]
    fn tui_flags() {
        assert_eq!(
            action(&["adsreport", "--demo", "--profiles", "--gateway", "http://h:1/reports-api"]),
            Action::Tui {
                demo: true,
                start_on_profiles: true,
                gateway: Some("http://h:1/reports-api".into())
            }
        );
    }

    #[test]
    fn serve_with_bind() {
        assert_eq!(
            action(&["adsreport", "serve", "--bind", "0.0.0.0:9000"]),
            Action::Serve {
                bind: Some("0.0.0.0:9000".parse().unwrap())
            }
        );
        assert_eq!(action(&["adsreport", "serve"]), Action::Serve { bind: None });
    }

    #[test]
    fn bad_bind_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["adsreport", "serve", "--bind", "nope"]).is_err());
    }
}
