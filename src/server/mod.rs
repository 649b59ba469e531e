//! Demo reports API server
//!
//! Serves the in-memory [`DemoBackend`] over the same single-endpoint RPC
//! protocol the UI speaks: `POST /reports-api` with `{operation, ...args}`.

mod backend;
mod display;

pub use backend::{DemoBackend, SharedBackend};

use anyhow::{Context, Result};
use axum::{body::Bytes, extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::PoisonError;
use tokio::net::TcpListener;

/// Build the router for the reports API
pub fn router(backend: SharedBackend) -> Router {
    Router::new()
        .route("/reports-api", get(describe).post(handle_operation))
        .with_state(backend)
}

async fn describe() -> &'static str {
    "This is the report api."
}

/// Dispatch one operation body; anything that is not a JSON object gets the
/// error envelope rather than an HTTP error
async fn handle_operation(State(backend): State<SharedBackend>, body: Bytes) -> Json<Value> {
    let response = match serde_json::from_slice::<Value>(&body) {
        Ok(request) if request.is_object() => backend
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .dispatch(&request),
        _ => json!({ "error": "Must post a json." }),
    };
    Json(response)
}

/// Bind and serve until `shutdown` resolves
pub async fn serve(
    bind_addr: SocketAddr,
    backend: SharedBackend,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let app = router(backend);

    let listener = TcpListener::bind(bind_addr)
        .await
        .context("Failed to bind to address")?;

    tracing::info!("Reports API listening on http://{}/reports-api", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    tracing::info!("Reports API shut down gracefully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn non_json_body_gets_error_envelope() {
        let backend = DemoBackend::shared();
        let Json(response) = handle_operation(State(backend), Bytes::from_static(b"nope")).await;
        assert_eq!(response, json!({"error": "Must post a json."}));
    }

    #[tokio::test]
    async fn json_body_is_dispatched() {
        let backend = DemoBackend::shared();
        let body = Bytes::from_static(br#"{"operation": "get-values"}"#);
        let Json(response) = handle_operation(State(backend), body).await;
        assert_eq!(response["ad_types"][0], "SPONSORED_PRODUCTS");
    }
}
