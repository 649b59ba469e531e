// Data model shared by the gateway, controller and table renderer
//
// Reports are schema-less: the remote system decides which keys a report
// carries, and the set varies by report type. We keep them as ordered JSON
// maps (serde_json's preserve_order feature) so header order follows the
// order the server sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Field used to identify a report for status lookups
pub const REPORT_ID_FIELD: &str = "Report Id";

/// A server-computed report record with an open key set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report(Map<String, Value>);

impl Report {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Keys in server order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// A record's `Report Id` exactly as the server sent it; null and `""` mean none
pub fn record_id(record: &Map<String, Value>) -> Option<&Value> {
    record
        .get(REPORT_ID_FIELD)
        .filter(|id| !display_value(id).is_empty())
}

/// Render a raw JSON value the way a table cell shows it
///
/// Strings lose their quotes and null becomes an empty cell. Nested values
/// fall back to compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Selectable ad types and report types, fetched once per session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub ad_types: Vec<String>,
    pub report_types: Vec<String>,
}

impl Catalog {
    pub fn has_ad_type(&self, value: &str) -> bool {
        self.ad_types.iter().any(|t| t == value)
    }

    pub fn has_report_type(&self, value: &str) -> bool {
        self.report_types.iter().any(|t| t == value)
    }
}

/// Profile identifier, echoed back to the server exactly as received
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileId::Number(n) => write!(f, "{}", n),
            ProfileId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// An advertiser account context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub profile_id: ProfileId,
    pub account_info: AccountInfo,
    pub country_code: String,
}

impl Profile {
    /// `"{name} ~ {countryCode} ~ {type}"`
    pub fn display_name(&self) -> String {
        format!(
            "{} ~ {} ~ {}",
            self.account_info.name, self.country_code, self.account_info.kind
        )
    }
}

/// A validated report request, field names match the wire format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub ad_type: String,
    pub report_type: String,
    pub start_date: String,
    pub end_date: String,
}
