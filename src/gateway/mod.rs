//! Remote operation gateway
//!
//! The reports API is a single RPC-style endpoint: every call is a JSON body
//! `{"operation": "...", ...args}` answered with a JSON document. The UI treats
//! the endpoint as an opaque async function behind the [`Gateway`] trait.
//!
//! # Implementations
//!
//! - [`HttpGateway`] - POSTs to a remote endpoint with reqwest
//! - [`LocalGateway`] - dispatches into the in-process demo backend
//!
//! [`GatewayClient`] layers typed operations on top of any gateway and turns
//! the server's `{"error": "..."}` envelope into [`GatewayError::Remote`].

mod error;
mod http;
mod local;

pub use error::GatewayError;
pub use http::HttpGateway;
pub use local::LocalGateway;

use crate::model::{Catalog, Profile, ProfileId, Report, ReportRequest};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Every operation the reports API understands
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Reports,
    AvailableReports,
    ProfileName,
    GetValues,
    RequestReport(ReportRequest),
    ReportStatus { report_id: Value },
    Profiles,
    SelectProfile { profile_id: ProfileId },
}

impl Operation {
    /// Wire name of the operation
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Reports => "reports",
            Operation::AvailableReports => "available-reports",
            Operation::ProfileName => "profile-name",
            Operation::GetValues => "get-values",
            Operation::RequestReport(_) => "request-report",
            Operation::ReportStatus { .. } => "report-status",
            Operation::Profiles => "profiles",
            Operation::SelectProfile { .. } => "select-profile",
        }
    }

    /// Build the request body: operation name plus flattened arguments
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("operation".into(), Value::from(self.name()));

        match self {
            Operation::RequestReport(request) => {
                body.insert("ad_type".into(), json!(request.ad_type));
                body.insert("report_type".into(), json!(request.report_type));
                body.insert("start_date".into(), json!(request.start_date));
                body.insert("end_date".into(), json!(request.end_date));
            }
            Operation::ReportStatus { report_id } => {
                body.insert("report_id".into(), report_id.clone());
            }
            Operation::SelectProfile { profile_id } => {
                body.insert("profile_id".into(), json!(profile_id));
            }
            _ => {}
        }

        Value::Object(body)
    }
}

/// An asynchronous `call(operation, args) -> JSON` endpoint
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn call(&self, operation: &Operation) -> Result<Value, GatewayError>;
}

#[derive(Deserialize)]
struct ReportsResponse {
    reports: Vec<Report>,
}

#[derive(Deserialize)]
struct AvailableReportsResponse {
    reports: Vec<Value>,
}

#[derive(Deserialize)]
struct ProfileNameResponse {
    name: String,
}

#[derive(Deserialize)]
struct ProfilesResponse {
    profiles: Vec<Profile>,
}

/// Typed front for a [`Gateway`], cheap to clone into spawned tasks
#[derive(Clone)]
pub struct GatewayClient {
    inner: Arc<dyn Gateway>,
}

impl GatewayClient {
    pub fn new(inner: Arc<dyn Gateway>) -> Self {
        Self { inner }
    }

    async fn typed<T: DeserializeOwned>(&self, operation: Operation) -> Result<T, GatewayError> {
        let name = operation.name();
        tracing::debug!(operation = name, "Gateway call");

        let value = self.inner.call(&operation).await?;
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return Err(GatewayError::Remote {
                operation: name,
                message: message.to_string(),
            });
        }

        serde_json::from_value(value).map_err(|source| GatewayError::Decode {
            operation: name,
            source,
        })
    }

    pub async fn reports(&self) -> Result<Vec<Report>, GatewayError> {
        let response: ReportsResponse = self.typed(Operation::Reports).await?;
        Ok(response.reports)
    }

    /// Advisory list of report kinds; stored but not rendered
    pub async fn available_reports(&self) -> Result<Vec<Value>, GatewayError> {
        let response: AvailableReportsResponse = self.typed(Operation::AvailableReports).await?;
        Ok(response.reports)
    }

    pub async fn profile_name(&self) -> Result<String, GatewayError> {
        let response: ProfileNameResponse = self.typed(Operation::ProfileName).await?;
        Ok(response.name)
    }

    pub async fn catalog(&self) -> Result<Catalog, GatewayError> {
        self.typed(Operation::GetValues).await
    }

    /// Submit a report request; answers the server's full report list
    pub async fn request_report(&self, request: ReportRequest) -> Result<Vec<Report>, GatewayError> {
        let response: ReportsResponse = self.typed(Operation::RequestReport(request)).await?;
        Ok(response.reports)
    }

    /// Refresh one report's status; answers the server's full report list
    pub async fn report_status(&self, report_id: Value) -> Result<Vec<Report>, GatewayError> {
        let response: ReportsResponse = self.typed(Operation::ReportStatus { report_id }).await?;
        Ok(response.reports)
    }

    pub async fn profiles(&self) -> Result<Vec<Profile>, GatewayError> {
        let response: ProfilesResponse = self.typed(Operation::Profiles).await?;
        Ok(response.profiles)
    }

    /// Switch the server-side active profile. The response body is ignored.
    pub async fn select_profile(&self, profile_id: ProfileId) -> Result<(), GatewayError> {
        let operation = Operation::SelectProfile { profile_id };
        tracing::debug!(operation = operation.name(), "Gateway call");
        self.inner.call(&operation).await?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingGateway;
    use super::*;

    #[test]
    fn request_report_body_uses_wire_names() {
        let op = Operation::RequestReport(ReportRequest {
            ad_type: "SPONSORED_PRODUCTS".into(),
            report_type: "campaign".into(),
            start_date: "2024-01-01".into(),
            end_date: "2024-01-31".into(),
        });

        assert_eq!(
            op.to_body(),
            json!({
                "operation": "request-report",
                "ad_type": "SPONSORED_PRODUCTS",
                "report_type": "campaign",
                "start_date": "2024-01-01",
                "end_date": "2024-01-31",
            })
        );
    }

    #[test]
    fn argument_free_operations_carry_only_the_name() {
        assert_eq!(Operation::GetValues.to_body(), json!({"operation": "get-values"}));
        assert_eq!(
            Operation::SelectProfile {
                profile_id: ProfileId::Number(9)
            }
            .to_body(),
            json!({"operation": "select-profile", "profile_id": 9})
        );
    }

    #[tokio::test]
    async fn error_envelope_becomes_remote_error() {
        let gateway = RecordingGateway::new();
        gateway.respond("profile-name", json!({"error": "Profile not found."}));
        let client = GatewayClient::new(gateway);

        let err = client.profile_name().await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Remote { operation: "profile-name", ref message } if message == "Profile not found."
        ));
    }

    #[tokio::test]
    async fn malformed_response_is_a_decode_error() {
        let gateway = RecordingGateway::new();
        gateway.respond("reports", json!({"rows": []}));
        let client = GatewayClient::new(gateway);

        let err = client.reports().await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode { operation: "reports", .. }));
    }

    #[tokio::test]
    async fn select_profile_ignores_response_body() {
        let gateway = RecordingGateway::new();
        gateway.respond("select-profile", json!({"anything": "goes"}));
        let client = GatewayClient::new(gateway.clone());

        client
            .select_profile(ProfileId::Text("p-1".into()))
            .await
            .unwrap();
        assert_eq!(
            gateway.calls(),
            vec![json!({"operation": "select-profile", "profile_id": "p-1"})]
        );
    }
}
