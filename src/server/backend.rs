// Demo reports backend
//
// In-memory stand-in for the reports API: a fixed set of profiles, the
// ad-type/report-type catalogs, and reports that advance one status step
// each time their status is checked. Used by `adsreport serve` and by the
// in-process demo gateway.

use super::display::{normalize_table, readable_row, report_display_name};
use crate::model::{AccountInfo, Profile, ProfileId};
use chrono::NaiveDate;
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};

/// Backend shared between request handlers
pub type SharedBackend = Arc<Mutex<DemoBackend>>;

/// Ad types accepted by `request-report`, in catalog order
pub const AD_TYPES: &[&str] = &["SPONSORED_PRODUCTS", "SPONSORED_BRANDS", "SPONSORED_DISPLAY"];

/// Report types accepted by `request-report`, in catalog order
pub const REPORT_TYPES: &[&str] = &[
    "campaign",
    "ad_group",
    "ad",
    "keywords",
    "targets",
    "targeting",
    "advertised_products",
    "purchased_products",
    "search_term",
];

/// Report name prefixes per ad type
const AD_TYPE_PREFIXES: &[&str] = &["sp", "sb", "sd"];

/// Server-side report status progression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    Pending,
    Processing,
    Completed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "PENDING",
            ReportStatus::Processing => "PROCESSING",
            ReportStatus::Completed => "COMPLETED",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(ReportStatus::Pending),
            "PROCESSING" => Some(ReportStatus::Processing),
            "COMPLETED" => Some(ReportStatus::Completed),
            _ => None,
        }
    }

    /// One step forward; completed reports stay completed
    pub fn advance(self) -> Self {
        match self {
            ReportStatus::Pending => ReportStatus::Processing,
            ReportStatus::Processing | ReportStatus::Completed => ReportStatus::Completed,
        }
    }
}

fn error_body(message: impl Into<String>) -> Value {
    json!({ "error": message.into() })
}

pub struct DemoBackend {
    profiles: Vec<Profile>,
    /// Active profile, stringified like every id comparison on this side
    profile_id: Option<String>,
    /// Raw report records with snake_case keys
    reports: Vec<Map<String, Value>>,
}

impl DemoBackend {
    pub fn new() -> Self {
        Self {
            profiles: sample_profiles(),
            profile_id: None,
            reports: Vec::new(),
        }
    }

    pub fn shared() -> SharedBackend {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Handle one `{operation, ...args}` body and produce the JSON answer
    pub fn dispatch(&mut self, body: &Value) -> Value {
        let Some(operation) = body.get("operation").and_then(Value::as_str) else {
            return error_body("Must specify operation.");
        };

        tracing::debug!(operation, "Demo API call");

        match operation {
            "profiles" => json!({ "profiles": self.profiles }),
            "select-profile" => self.select_profile(body),
            "profile-name" => self.profile_name(),
            "available-reports" => json!({ "reports": available_report_names() }),
            "reports" => self.reports_body(),
            "get-values" => json!({ "ad_types": AD_TYPES, "report_types": REPORT_TYPES }),
            "request-report" => self.request_report(body),
            "report-status" => self.report_status(body),
            _ => error_body("Must post a json."),
        }
    }

    fn select_profile(&mut self, body: &Value) -> Value {
        let Some(id) = body.get("profile_id") else {
            return error_body("Missing field `profile_id`.");
        };
        let id = match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        tracing::info!(profile_id = %id, "Active profile changed");
        self.profile_id = Some(id);
        json!({ "success": true })
    }

    fn profile_name(&self) -> Value {
        let active = self.profile_id.as_deref();
        match self
            .profiles
            .iter()
            .find(|p| Some(p.profile_id.to_string().as_str()) == active)
        {
            Some(profile) => json!({ "name": profile.display_name() }),
            None => error_body("Profile not found."),
        }
    }

    /// Full report list, normalized for display
    fn reports_body(&self) -> Value {
        let reports: Vec<Map<String, Value>> = normalize_table(&self.reports)
            .iter()
            .map(readable_row)
            .collect();
        json!({ "reports": reports })
    }

    fn request_report(&mut self, body: &Value) -> Value {
        let field = |name: &str| body.get(name).and_then(Value::as_str);

        let (Some(ad_type), Some(report_type), Some(start), Some(end)) = (
            field("ad_type"),
            field("report_type"),
            field("start_date"),
            field("end_date"),
        ) else {
            return error_body("Missing report request field.");
        };

        if !AD_TYPES.contains(&ad_type) {
            return error_body(format!("Unknown ad type: {}", ad_type));
        }
        if !REPORT_TYPES.contains(&report_type) {
            return error_body(format!("Unknown report type: {}", report_type));
        }
        for date in [start, end] {
            if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                return error_body(format!("Invalid date: {}", date));
            }
        }

        let report_id = uuid::Uuid::new_v4().to_string();
        tracing::info!(%report_id, ad_type, report_type, start, end, "Report requested");

        let mut report = Map::new();
        report.insert("report_id".into(), json!(report_id));
        report.insert("profile_id".into(), json!(self.profile_id));
        report.insert("ad_type".into(), json!(ad_type));
        report.insert("report_type".into(), json!(report_type));
        report.insert("start_date".into(), json!(start));
        report.insert("end_date".into(), json!(end));
        report.insert("status".into(), json!(ReportStatus::Pending.as_str()));
        report.insert("download_url".into(), Value::Null);
        report.insert("data_path".into(), Value::Null);
        self.reports.push(report);

        self.reports_body()
    }

    fn report_status(&mut self, body: &Value) -> Value {
        let wanted = match body.get("report_id") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => return error_body("Missing field `report_id`."),
        };

        for report in self.reports.iter_mut() {
            let id = report.get("report_id").and_then(Value::as_str).unwrap_or_default();
            if id != wanted {
                continue;
            }

            let current = report
                .get("status")
                .and_then(Value::as_str)
                .and_then(ReportStatus::parse)
                .unwrap_or(ReportStatus::Pending);
            let next = current.advance();
            report.insert("status".into(), json!(next.as_str()));

            let has_url = report.get("download_url").is_some_and(|url| !url.is_null());
            if next == ReportStatus::Completed && !has_url {
                report.insert(
                    "download_url".into(),
                    json!(format!("https://reports.invalid/{}.json.gz", wanted)),
                );
                report.insert(
                    "data_path".into(),
                    json!(format!("report-data/{}.json", uuid::Uuid::new_v4())),
                );
            }
            tracing::debug!(report_id = %wanted, status = next.as_str(), "Report status checked");
        }

        self.reports_body()
    }
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Readable names of every report kind, e.g. `SP Campaign`
pub fn available_report_names() -> Vec<String> {
    AD_TYPE_PREFIXES
        .iter()
        .flat_map(|prefix| {
            REPORT_TYPES
                .iter()
                .map(move |report_type| report_display_name(&format!("{}_{}", prefix, report_type)))
        })
        .collect()
}

fn sample_profiles() -> Vec<Profile> {
    let profile = |id: i64, name: &str, kind: &str, country: &str| Profile {
        profile_id: ProfileId::Number(id),
        account_info: AccountInfo {
            name: name.to_string(),
            kind: kind.to_string(),
        },
        country_code: country.to_string(),
    };

    vec![
        profile(1_234_567_890, "Acme Outdoor", "seller", "US"),
        profile(2_345_678_901, "Acme Outdoor", "seller", "CA"),
        profile(3_456_789_012, "Northwind Books", "vendor", "GB"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(backend: &mut DemoBackend) -> Value {
        backend.dispatch(&json!({
            "operation": "request-report",
            "ad_type": "SPONSORED_PRODUCTS",
            "report_type": "campaign",
            "start_date": "2024-01-01",
            "end_date": "2024-01-31",
        }))
    }

    #[test]
    fn missing_and_unknown_operations() {
        let mut backend = DemoBackend::new();
        assert_eq!(
            backend.dispatch(&json!({})),
            json!({"error": "Must specify operation."})
        );
        assert_eq!(
            backend.dispatch(&json!({"operation": "download-report"})),
            json!({"error": "Must post a json."})
        );
    }

    #[test]
    fn profile_name_requires_selection() {
        let mut backend = DemoBackend::new();
        assert_eq!(
            backend.dispatch(&json!({"operation": "profile-name"})),
            json!({"error": "Profile not found."})
        );

        let selected = backend.dispatch(&json!({"operation": "select-profile", "profile_id": 3456789012i64}));
        assert_eq!(selected, json!({"success": true}));
        assert_eq!(
            backend.dispatch(&json!({"operation": "profile-name"})),
            json!({"name": "Northwind Books ~ GB ~ vendor"})
        );
    }

    #[test]
    fn requested_report_has_readable_headers() {
        let mut backend = DemoBackend::new();
        let response = request(&mut backend);

        let report = &response["reports"][0];
        let keys: Vec<_> = report.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "Report Id",
                "Profile Id",
                "Ad Type",
                "Report Type",
                "Start Date",
                "End Date",
                "Status",
                "Data Path"
            ]
        );
        assert_eq!(report["Status"], "PENDING");
    }

    #[test]
    fn request_rejects_unknown_values() {
        let mut backend = DemoBackend::new();
        let response = backend.dispatch(&json!({
            "operation": "request-report",
            "ad_type": "TV",
            "report_type": "campaign",
            "start_date": "2024-01-01",
            "end_date": "2024-01-31",
        }));
        assert_eq!(response, json!({"error": "Unknown ad type: TV"}));

        let response = backend.dispatch(&json!({
            "operation": "request-report",
            "ad_type": "SPONSORED_PRODUCTS",
            "report_type": "campaign",
            "start_date": "2024-13-01",
            "end_date": "2024-01-31",
        }));
        assert_eq!(response, json!({"error": "Invalid date: 2024-13-01"}));
    }

    #[test]
    fn status_checks_walk_to_completed() {
        let mut backend = DemoBackend::new();
        let response = request(&mut backend);
        let id = response["reports"][0]["Report Id"].as_str().unwrap().to_string();

        let check = |backend: &mut DemoBackend| {
            backend.dispatch(&json!({"operation": "report-status", "report_id": id}))["reports"][0]
                .clone()
        };

        assert_eq!(check(&mut backend)["Status"], "PROCESSING");
        let done = check(&mut backend);
        assert_eq!(done["Status"], "COMPLETED");
        assert!(done["Data Path"].as_str().unwrap().starts_with("report-data/"));
        assert!(done.get("Download Url").is_none());
        assert_eq!(check(&mut backend)["Status"], "COMPLETED");
    }

    #[test]
    fn status_for_unknown_id_returns_list_unchanged() {
        let mut backend = DemoBackend::new();
        let before = request(&mut backend);
        let after = backend.dispatch(&json!({"operation": "report-status", "report_id": "nope"}));
        assert_eq!(before, after);
    }

    #[test]
    fn available_reports_cover_every_ad_type() {
        let names = available_report_names();
        assert_eq!(names.len(), AD_TYPE_PREFIXES.len() * REPORT_TYPES.len());
        assert_eq!(names[0], "SP Campaign");
        assert!(names.contains(&"SD Search Term".to_string()));
    }
}
