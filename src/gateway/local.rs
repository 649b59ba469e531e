//! In-process gateway for demo mode
//!
//! Dispatches operation bodies straight into the demo backend, after an
//! optional simulated network delay so the UI's async behavior stays visible.

use super::{Gateway, GatewayError, Operation};
use crate::server::SharedBackend;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::PoisonError;
use std::time::Duration;

pub struct LocalGateway {
    backend: SharedBackend,
    latency: Duration,
}

impl LocalGateway {
    pub fn new(backend: SharedBackend, latency: Duration) -> Self {
        Self { backend, latency }
    }
}

#[async_trait]
impl Gateway for LocalGateway {
    async fn call(&self, operation: &Operation) -> Result<Value, GatewayError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let body = operation.to_body();
        let mut backend = self.backend.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(backend.dispatch(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayClient;
    use crate::model::ReportRequest;
    use crate::server::DemoBackend;
    use std::sync::Arc;

    #[tokio::test]
    async fn request_then_status_progresses_the_report() {
        let gateway = LocalGateway::new(DemoBackend::shared(), Duration::ZERO);
        let client = GatewayClient::new(Arc::new(gateway));

        let reports = client
            .request_report(ReportRequest {
                ad_type: "SPONSORED_BRANDS".into(),
                report_type: "keywords".into(),
                start_date: "2024-03-01".into(),
                end_date: "2024-03-07".into(),
            })
            .await
            .unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].get("Status").unwrap(), "PENDING");

        let id = reports[0].get("Report Id").cloned().unwrap();
        let reports = client.report_status(id).await.unwrap();
        assert_eq!(reports[0].get("Status").unwrap(), "PROCESSING");
    }
}
