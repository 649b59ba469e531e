//! Gateway error types

use thiserror::Error;

/// Errors that can occur while calling the reports API
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("`{operation}` returned HTTP {status}")]
    Status { operation: &'static str, status: u16 },

    #[error("Malformed `{operation}` response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("`{operation}` failed: {message}")]
    Remote {
        operation: &'static str,
        message: String,
    },
}
