//! HTTP gateway: POSTs operation bodies to the reports API endpoint

use super::{Gateway, GatewayError, Operation};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Gateway backed by a remote `/reports-api` endpoint
///
/// No timeout and no retry: a hung call simply never completes, and the
/// affected state keeps its last value.
pub struct HttpGateway {
    client: reqwest::Client,
    url: String,
}

impl HttpGateway {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn call(&self, operation: &Operation) -> Result<Value, GatewayError> {
        let response = self
            .client
            .post(&self.url)
            .json(&operation.to_body())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                operation: operation.name(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| GatewayError::Decode {
            operation: operation.name(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayClient;
    use crate::server::{self, DemoBackend};
    use axum::routing::post;
    use axum::Router;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    /// Serve `app` on an ephemeral port, returning its base URL
    async fn spawn(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn talks_to_the_demo_server() {
        let base = spawn(server::router(DemoBackend::shared())).await;
        let gateway = HttpGateway::new(format!("{}/reports-api", base)).unwrap();
        let client = GatewayClient::new(Arc::new(gateway));

        let catalog = client.catalog().await.unwrap();
        assert_eq!(catalog.ad_types[0], "SPONSORED_PRODUCTS");
        assert_eq!(catalog.report_types[0], "campaign");

        let profiles = client.profiles().await.unwrap();
        assert!(!profiles.is_empty());

        client
            .select_profile(profiles[0].profile_id.clone())
            .await
            .unwrap();
        assert_eq!(client.profile_name().await.unwrap(), profiles[0].display_name());
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let base = spawn(server::router(DemoBackend::shared())).await;
        let gateway = HttpGateway::new(format!("{}/missing", base)).unwrap();

        let err = gateway.call(&Operation::Reports).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Status {
                operation: "reports",
                status: 404
            }
        ));
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let app = Router::new().route("/broken", post(|| async { "<html>oops</html>" }));
        let base = spawn(app).await;
        let gateway = HttpGateway::new(format!("{}/broken", base)).unwrap();

        let err = gateway.call(&Operation::GetValues).await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode { operation: "get-values", .. }));
    }
}
