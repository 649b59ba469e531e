// adsreport - terminal front-end for an advertising reports API
//
// Request reports, check their status and switch advertiser profiles against
// a single RPC-style JSON endpoint.
//
// Architecture:
// - Gateway: `call(operation, args) -> JSON` over HTTP or in-process
// - Controllers: per-screen state, mutated only on the UI loop
// - Table: schema-less report rows with per-column cell renderers
// - TUI (ratatui): event loop, panels, modals
// - Server (axum): in-memory demo implementation of the reports API
// - Event system: spawned gateway calls report back over an mpsc channel

mod cli;
mod config;
mod controller;
mod gateway;
mod logging;
mod model;
mod server;
mod table;
mod theme;
mod tui;

use anyhow::Result;
use cli::Action;
use config::Config;
use gateway::{GatewayClient, HttpGateway, LocalGateway};
use logging::{LogBuffer, LogTarget};
use server::DemoBackend;
use std::sync::Arc;
use std::time::Duration;
use tui::app::Screen;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Config commands run to completion here
    let action = cli::handle_cli()?;
    if action == Action::Done {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let mut config = Config::from_env()?;

    // In TUI mode logs are captured for the logs panel so they don't garble
    // the display; the server logs to stdout. The guard flushes file logs.
    let log_buffer = LogBuffer::new();
    let target = match action {
        Action::Serve { .. } => LogTarget::Stdout,
        _ => LogTarget::Tui,
    };
    let _file_guard = logging::init(&config.logging, target, &log_buffer);

    match action {
        Action::Serve { bind } => {
            let bind_addr = bind.unwrap_or(config.bind_addr);
            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("Failed to listen for shutdown signal: {}", e);
                }
            };
            server::serve(bind_addr, DemoBackend::shared(), shutdown).await
        }
        Action::Tui {
            demo,
            start_on_profiles,
            gateway,
        } => {
            if let Some(url) = gateway {
                config.gateway_url = url;
            }
            let client = if demo || config.demo_mode {
                tracing::info!("Running in DEMO MODE against an in-process backend");
                GatewayClient::new(Arc::new(LocalGateway::new(
                    DemoBackend::shared(),
                    Duration::from_millis(config.demo_latency_ms),
                )))
            } else {
                tracing::info!("Using reports API at {}", config.gateway_url);
                GatewayClient::new(Arc::new(HttpGateway::new(config.gateway_url.clone())?))
            };

            let screen = if start_on_profiles {
                Screen::Profiles
            } else {
                Screen::Reports
            };
            tui::run_tui(config, client, log_buffer, screen).await
        }
        Action::Done => Ok(()),
    }
}
