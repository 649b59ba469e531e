// Logging module - subscriber setup and in-memory log capture
//
// In TUI mode events go to a bounded in-memory buffer that the logs panel
// renders, so nothing breaks through the alternate screen. In serve mode they
// go to stdout. Either way an optional JSON file layer can be added.

use crate::config::{LogRotation, LoggingConfig};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{Level, Metadata, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Maximum number of log entries to keep in memory
const MAX_LOG_ENTRIES: usize = 1000;

/// A single log entry captured from tracing
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    /// Message followed by any structured fields as `key=value`
    pub message: String,
}

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<&Level> for LogLevel {
    fn from(level: &Level) -> Self {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            Level::DEBUG => LogLevel::Debug,
            Level::TRACE => LogLevel::Trace,
        }
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// In-memory log buffer with bounded size (ring buffer)
#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES))),
        }
    }

    // A panic while logging must not take the log panel down with it
    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a log entry, dropping the oldest one when full
    pub fn add(&self, entry: LogEntry) {
        let mut entries = self.lock();
        if entries.len() >= MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// All log entries, most recent last
    pub fn get_all(&self) -> Vec<LogEntry> {
        self.lock().iter().cloned().collect()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracing layer that captures events into a [`LogBuffer`]
pub struct TuiLogLayer {
    buffer: LogBuffer,
}

impl TuiLogLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for TuiLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let level = LogLevel::from(event.metadata().level());

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.buffer.add(LogEntry {
            timestamp: Utc::now(),
            level,
            message: visitor.finish(),
        });
    }

    fn enabled(&self, _metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        // Filtering happens at subscriber level
        true
    }
}

/// Collects the message and structured fields of one event
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Where console-bound log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Captured for the logs panel
    Tui,
    /// Written to stdout
    Stdout,
}

/// Install the global subscriber
///
/// Precedence: RUST_LOG env var > config file > default "info". The returned
/// guard must be kept alive for the file writer to flush.
pub fn init(config: &LoggingConfig, target: LogTarget, buffer: &LogBuffer) -> Option<WorkerGuard> {
    let default_filter = format!("adsreport={},axum=info", config.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let tui_layer = (target == LogTarget::Tui).then(|| TuiLogLayer::new(buffer.clone()));
    let stdout_layer = (target == LogTarget::Stdout).then(|| tracing_subscriber::fmt::layer());

    let (file_layer, guard) = match file_writer(config) {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}

/// Rolling non-blocking file writer, if file logging is enabled and possible
fn file_writer(
    config: &LoggingConfig,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !config.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&config.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            config.file_dir, e
        );
        return None;
    }

    let appender = match config.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&config.file_dir, &config.file_prefix)
        }
        LogRotation::Daily => tracing_appender::rolling::daily(&config.file_dir, &config.file_prefix),
        LogRotation::Never => tracing_appender::rolling::never(&config.file_dir, &config.file_prefix),
    };

    Some(tracing_appender::non_blocking(appender))
}
