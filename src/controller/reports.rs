//! Report lifecycle controller
//!
//! Owns everything the Reports screen shows: the report set, the catalogs,
//! the profile name and the pending request form. It turns operator actions
//! into gateway calls and merges their results.
//!
//! # Merge policy
//!
//! Every response that carries reports (`reports`, `request-report`,
//! `report-status`) replaces the whole set. The server is the source of truth
//! for what "all reports" means, so there is nothing local to reconcile.
//! Concurrent calls are not guarded: whichever response arrives last wins.
//!
//! Failed calls are logged and leave their state slice untouched.

use super::form::{FormField, PendingForm, ValidationError};
use super::UpdateSender;
use crate::gateway::{GatewayClient, GatewayError};
use crate::model::{display_value, Catalog, Report};
use serde_json::Value;

/// Completion of one gateway call issued by the controller
#[derive(Debug)]
pub enum ReportUpdate {
    /// Full replacement report set, tagged with the operation that produced it
    Reports {
        operation: &'static str,
        result: Result<Vec<Report>, GatewayError>,
    },
    AvailableReports(Result<Vec<Value>, GatewayError>),
    ProfileName(Result<String, GatewayError>),
    Catalog(Result<Catalog, GatewayError>),
}

pub struct ReportController {
    client: GatewayClient,
    updates: UpdateSender,

    /// Current report set, in server order
    reports: Vec<Report>,

    /// Advisory list of report kinds (fetched, never rendered)
    available_reports: Vec<Value>,

    /// Display name of the active profile
    profile_name: String,

    catalog: Catalog,

    /// Set once the first catalog has seeded the form defaults
    seeded: bool,

    form: PendingForm,

    /// Calls issued but not yet applied (display only, never a guard)
    in_flight: usize,
}

impl ReportController {
    pub fn new(client: GatewayClient, updates: UpdateSender) -> Self {
        Self {
            client,
            updates,
            reports: Vec::new(),
            available_reports: Vec::new(),
            profile_name: String::new(),
            catalog: Catalog::default(),
            seeded: false,
            form: PendingForm::default(),
            in_flight: 0,
        }
    }

    /// Fan out the four independent startup fetches
    ///
    /// They may complete in any order; each result only touches its own slice.
    pub fn initialize(&mut self) {
        tracing::info!(session = self.updates.session(), "Loading reports session");
        self.in_flight += 4;

        let client = self.client.clone();
        self.updates.spawn(async move {
            ReportUpdate::Reports {
                operation: "reports",
                result: client.reports().await,
            }
        });

        let client = self.client.clone();
        self.updates
            .spawn(async move { ReportUpdate::AvailableReports(client.available_reports().await) });

        let client = self.client.clone();
        self.updates
            .spawn(async move { ReportUpdate::ProfileName(client.profile_name().await) });

        let client = self.client.clone();
        self.updates
            .spawn(async move { ReportUpdate::Catalog(client.catalog().await) });
    }

    /// Merge a finished call into state
    pub fn apply(&mut self, update: ReportUpdate) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match update {
            ReportUpdate::Reports { operation, result } => match result {
                Ok(reports) => {
                    tracing::debug!(operation, count = reports.len(), "Report set replaced");
                    self.reports = reports;
                }
                Err(e) => tracing::warn!("Failed to load reports: {}", e),
            },
            ReportUpdate::AvailableReports(result) => match result {
                Ok(available) => self.available_reports = available,
                Err(e) => tracing::warn!("Failed to load available reports: {}", e),
            },
            ReportUpdate::ProfileName(result) => match result {
                Ok(name) => self.profile_name = name,
                Err(e) => tracing::warn!("Failed to load profile name: {}", e),
            },
            ReportUpdate::Catalog(result) => match result {
                Ok(catalog) => {
                    self.catalog = catalog;
                    if !self.seeded {
                        self.form.seed(&self.catalog);
                        self.seeded = true;
                    }
                }
                Err(e) => tracing::warn!("Failed to load report catalog: {}", e),
            },
        }
    }

    /// Replace one pending-form field; catalog non-members are ignored
    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) -> bool {
        self.form.set(field, value.into(), &self.catalog)
    }

    /// Move a choice field to the next (or previous) catalog entry, wrapping
    pub fn cycle_choice(&mut self, field: FormField, forward: bool) -> bool {
        let options = match field {
            FormField::AdType => &self.catalog.ad_types,
            FormField::ReportType => &self.catalog.report_types,
            FormField::StartDate | FormField::EndDate => return false,
        };
        if options.is_empty() {
            return false;
        }

        let len = options.len();
        let next = match options.iter().position(|o| o == self.form.get(field)) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        let value = options[next].clone();
        self.update_field(field, value)
    }

    /// Validate the form and issue `request-report`
    ///
    /// A validation failure makes no network call; the caller shows the error.
    pub fn submit_request(&mut self) -> Result<(), ValidationError> {
        let request = self.form.validate()?;
        tracing::info!(
            ad_type = %request.ad_type,
            report_type = %request.report_type,
            start = %request.start_date,
            end = %request.end_date,
            "Requesting report"
        );

        self.in_flight += 1;
        let client = self.client.clone();
        self.updates.spawn(async move {
            ReportUpdate::Reports {
                operation: "request-report",
                result: client.request_report(request).await,
            }
        });
        Ok(())
    }

    /// Issue a manual `report-status` refresh for one report
    pub fn check_status(&mut self, report_id: impl Into<Value>) {
        let report_id = report_id.into();
        tracing::info!(report_id = %display_value(&report_id), "Checking report status");

        self.in_flight += 1;
        let client = self.client.clone();
        self.updates.spawn(async move {
            ReportUpdate::Reports {
                operation: "report-status",
                result: client.report_status(report_id).await,
            }
        });
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    #[allow(dead_code)] // not rendered
    pub fn available_reports(&self) -> &[Value] {
        &self.available_reports
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn form(&self) -> &PendingForm {
        &self.form
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{SessionEvent, Update, UPDATE_CHANNEL_SIZE};
    use crate::gateway::testing::RecordingGateway;
    use crate::table::{report_table, CellContent};
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn controller(gateway: &Arc<RecordingGateway>) -> (ReportController, mpsc::Receiver<SessionEvent>) {
        let (tx, rx) = mpsc::channel(UPDATE_CHANNEL_SIZE);
        let client = GatewayClient::new(gateway.clone());
        (ReportController::new(client, UpdateSender::new(1, tx)), rx)
    }

    /// Apply events until every issued call has landed
    async fn settle(controller: &mut ReportController, rx: &mut mpsc::Receiver<SessionEvent>) {
        while controller.in_flight() > 0 {
            let event = rx.recv().await.expect("channel closed");
            match event.update {
                Update::Reports(update) => controller.apply(update),
                Update::Profiles(_) => panic!("unexpected profile update"),
            }
        }
    }

    fn standard_gateway() -> Arc<RecordingGateway> {
        let gateway = RecordingGateway::new();
        gateway.respond("reports", json!({"reports": []}));
        gateway.respond("available-reports", json!({"reports": ["SP Campaign"]}));
        gateway.respond("profile-name", json!({"name": "Acme ~ US ~ seller"}));
        gateway.respond(
            "get-values",
            json!({"ad_types": ["SPONSORED_PRODUCTS", "SPONSORED_BRANDS"], "report_types": ["campaign", "keywords"]}),
        );
        gateway
    }

    async fn ready(gateway: &Arc<RecordingGateway>) -> (ReportController, mpsc::Receiver<SessionEvent>) {
        let (mut controller, mut rx) = controller(gateway);
        controller.initialize();
        settle(&mut controller, &mut rx).await;
        (controller, rx)
    }

    fn reports(value: Value) -> Vec<Report> {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn initialize_fans_out_four_fetches() {
        let gateway = standard_gateway();
        let (controller, _rx) = ready(&gateway).await;

        let mut operations: Vec<_> = gateway
            .calls()
            .iter()
            .map(|c| c["operation"].as_str().unwrap().to_string())
            .collect();
        operations.sort();
        assert_eq!(
            operations,
            vec!["available-reports", "get-values", "profile-name", "reports"]
        );

        assert_eq!(controller.profile_name(), "Acme ~ US ~ seller");
        assert_eq!(controller.available_reports(), &[json!("SP Campaign")]);
        assert_eq!(controller.form().get(FormField::AdType), "SPONSORED_PRODUCTS");
        assert_eq!(controller.form().get(FormField::ReportType), "campaign");
    }

    #[tokio::test]
    async fn one_failed_fetch_leaves_the_others_intact() {
        let gateway = RecordingGateway::new();
        gateway.respond("reports", json!({"reports": [{"Report Id": "r1"}]}));
        gateway.respond("available-reports", json!({"reports": []}));
        gateway.respond("get-values", json!({"ad_types": ["A"], "report_types": ["b"]}));
        // profile-name has no canned answer and fails

        let (controller, _rx) = ready(&gateway).await;
        assert_eq!(controller.profile_name(), "");
        assert_eq!(controller.reports().len(), 1);
        assert_eq!(controller.form().get(FormField::AdType), "A");
    }

    #[tokio::test]
    async fn catalog_seeds_defaults_only_once() {
        let gateway = standard_gateway();
        let (mut controller, _rx) = ready(&gateway).await;

        assert!(controller.update_field(FormField::AdType, "SPONSORED_BRANDS"));
        controller.apply(ReportUpdate::Catalog(Ok(Catalog {
            ad_types: vec!["SPONSORED_PRODUCTS".into(), "SPONSORED_BRANDS".into()],
            report_types: vec!["campaign".into()],
        })));

        assert_eq!(controller.form().get(FormField::AdType), "SPONSORED_BRANDS");
    }

    #[tokio::test]
    async fn empty_catalog_seeds_nothing() {
        let gateway = standard_gateway();
        gateway.respond("get-values", json!({"ad_types": [], "report_types": []}));
        let (controller, _rx) = ready(&gateway).await;

        assert_eq!(controller.form().get(FormField::AdType), "");
        assert_eq!(controller.form().get(FormField::ReportType), "");
    }

    #[tokio::test]
    async fn update_field_ignores_values_outside_catalog() {
        let gateway = standard_gateway();
        let (mut controller, _rx) = ready(&gateway).await;
        let before = controller.form().clone();

        assert!(!controller.update_field(FormField::AdType, "RADIO"));
        assert_eq!(controller.form(), &before);

        assert!(controller.update_field(FormField::ReportType, "keywords"));
        assert_eq!(controller.form().get(FormField::ReportType), "keywords");
    }

    #[tokio::test]
    async fn cycle_choice_wraps_through_catalog() {
        let gateway = standard_gateway();
        let (mut controller, _rx) = ready(&gateway).await;

        assert!(controller.cycle_choice(FormField::AdType, true));
        assert_eq!(controller.form().get(FormField::AdType), "SPONSORED_BRANDS");
        assert!(controller.cycle_choice(FormField::AdType, true));
        assert_eq!(controller.form().get(FormField::AdType), "SPONSORED_PRODUCTS");
        assert!(controller.cycle_choice(FormField::AdType, false));
        assert_eq!(controller.form().get(FormField::AdType), "SPONSORED_BRANDS");
        assert!(!controller.cycle_choice(FormField::StartDate, true));
    }

    #[tokio::test]
    async fn valid_submit_issues_one_request_and_replaces_reports() {
        let gateway = standard_gateway();
        gateway.respond(
            "request-report",
            json!({"reports": [{"Report Id": "r2", "Status": "PENDING"}]}),
        );
        let (mut controller, mut rx) = ready(&gateway).await;
        controller.apply(ReportUpdate::Reports {
            operation: "reports",
            result: Ok(reports(json!([{"Report Id": "old", "Status": "COMPLETED"}]))),
        });

        controller.update_field(FormField::StartDate, "2024-01-01");
        controller.update_field(FormField::EndDate, "2024-01-31");
        controller.submit_request().unwrap();
        settle(&mut controller, &mut rx).await;

        assert_eq!(
            gateway.calls_to("request-report"),
            vec![json!({
                "operation": "request-report",
                "ad_type": "SPONSORED_PRODUCTS",
                "report_type": "campaign",
                "start_date": "2024-01-01",
                "end_date": "2024-01-31",
            })]
        );
        assert_eq!(
            controller.reports(),
            reports(json!([{"Report Id": "r2", "Status": "PENDING"}])).as_slice()
        );
    }

    #[tokio::test]
    async fn invalid_submit_makes_no_call() {
        let gateway = standard_gateway();
        let (mut controller, _rx) = ready(&gateway).await;
        let calls_before = gateway.calls().len();

        controller.update_field(FormField::StartDate, "2024-02-01");
        controller.update_field(FormField::EndDate, "2024-01-01");
        assert!(matches!(
            controller.submit_request(),
            Err(ValidationError::DateOrder { .. })
        ));

        controller.update_field(FormField::EndDate, "");
        assert_eq!(
            controller.submit_request(),
            Err(ValidationError::Missing(FormField::EndDate))
        );

        assert_eq!(gateway.calls().len(), calls_before);
        assert_eq!(controller.in_flight(), 0);
    }

    #[tokio::test]
    async fn check_status_sends_id_and_replaces_reports() {
        let gateway = standard_gateway();
        gateway.respond(
            "report-status",
            json!({"reports": [{"Report Id": "r1", "Status": "COMPLETED"}]}),
        );
        let (mut controller, mut rx) = ready(&gateway).await;

        controller.check_status("r1");
        settle(&mut controller, &mut rx).await;

        assert_eq!(
            gateway.calls_to("report-status"),
            vec![json!({"operation": "report-status", "report_id": "r1"})]
        );
        assert_eq!(controller.reports()[0].get("Status").unwrap(), "COMPLETED");
    }

    /// Report table as drawn: header row, then each row's cell text
    fn drawn_rows(controller: &ReportController) -> Vec<Vec<String>> {
        let table = report_table(controller.reports()).unwrap();
        let mut rows = vec![table.headers().to_vec()];
        rows.extend((0..table.row_count()).map(|row| {
            table
                .row_cells(row)
                .iter()
                .map(CellContent::display)
                .collect::<Vec<_>>()
        }));
        rows
    }

    #[tokio::test]
    async fn repeated_check_with_same_answer_leaves_table_unchanged() {
        let gateway = standard_gateway();
        gateway.respond(
            "report-status",
            json!({"reports": [
                {"Report Id": "r1", "Status": "PROCESSING"},
                {"Report Id": "r2", "Status": "PENDING"}
            ]}),
        );
        let (mut controller, mut rx) = ready(&gateway).await;

        controller.check_status("r1");
        settle(&mut controller, &mut rx).await;
        let first = drawn_rows(&controller);

        controller.check_status("r1");
        settle(&mut controller, &mut rx).await;
        let second = drawn_rows(&controller);

        assert_eq!(gateway.calls_to("report-status").len(), 2);
        assert_eq!(first, second);
        assert_eq!(first[1], vec!["r1", "PROCESSING", "[Check Status]"]);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_last_known_reports() {
        let gateway = standard_gateway();
        gateway.respond("reports", json!({"reports": [{"Report Id": "r1", "Status": "PENDING"}]}));
        let (mut controller, mut rx) = ready(&gateway).await;

        // report-status has no canned answer and fails
        controller.check_status("r1");
        settle(&mut controller, &mut rx).await;

        assert_eq!(controller.reports().len(), 1);
        assert_eq!(controller.reports()[0].get("Status").unwrap(), "PENDING");
    }

    #[tokio::test]
    async fn double_submit_is_not_deduplicated() {
        let gateway = standard_gateway();
        gateway.respond("request-report", json!({"reports": [{"Report Id": "r1"}]}));
        let (mut controller, mut rx) = ready(&gateway).await;

        controller.update_field(FormField::StartDate, "2024-01-01");
        controller.update_field(FormField::EndDate, "2024-01-02");
        controller.submit_request().unwrap();
        controller.submit_request().unwrap();
        assert_eq!(controller.in_flight(), 2);
        settle(&mut controller, &mut rx).await;

        assert_eq!(gateway.calls_to("request-report").len(), 2);
        assert_eq!(controller.reports().len(), 1);
    }
}
