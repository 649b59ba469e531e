// Report table derivation
//
// Headers come from the first report's keys plus a trailing "Check Status"
// action column. Later reports are read against those headers: a key they
// lack renders as an empty cell, and keys only they carry are not shown.

use super::{CellAction, CellContent, CellRenderer, DynamicTable};
use crate::model::{record_id, Report};
use serde_json::{Map, Value};

pub const CHECK_STATUS_HEADER: &str = "Check Status";

/// Button that refreshes the status of the row's report
#[derive(Debug, Default)]
pub struct CheckStatusButton;

impl CellRenderer for CheckStatusButton {
    fn render(&self, _record: &Map<String, Value>) -> CellContent {
        CellContent::Button(CHECK_STATUS_HEADER.to_string())
    }

    fn activate(&self, record: &Map<String, Value>) -> Option<CellAction> {
        let report_id = record_id(record)?.clone();
        Some(CellAction::CheckStatus { report_id })
    }
}

/// Build the report table, or `None` when there is nothing to show
pub fn report_table(reports: &[Report]) -> Option<DynamicTable> {
    let first = reports.first()?;

    let mut headers: Vec<String> = first.keys().map(str::to_string).collect();
    let action_column = headers.len();

    let rows = reports
        .iter()
        .map(|report| {
            let mut row: Vec<Value> = headers
                .iter()
                .map(|key| report.get(key).cloned().unwrap_or_else(|| Value::from("")))
                .collect();
            row.push(Value::Null);
            row
        })
        .collect();

    headers.push(CHECK_STATUS_HEADER.to_string());
    Some(DynamicTable::new(headers, rows).with_override(action_column, CheckStatusButton))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reports(value: Value) -> Vec<Report> {
        serde_json::from_value(value).unwrap()
    }

    fn text(table: &DynamicTable, row: usize) -> Vec<String> {
        table
            .row_cells(row)
            .iter()
            .map(|cell| cell.text().to_string())
            .collect()
    }

    #[test]
    fn no_reports_means_no_table() {
        assert!(report_table(&[]).is_none());
    }

    #[test]
    fn headers_follow_first_report_plus_action_column() {
        let table = report_table(&reports(json!([{"Report Id": "r1", "Status": "PENDING"}]))).unwrap();

        assert_eq!(table.headers(), &["Report Id", "Status", "Check Status"]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.cell(0, 2), CellContent::Button("Check Status".into()));
        assert_eq!(
            table.activate(0, 2),
            Some(CellAction::CheckStatus {
                report_id: json!("r1")
            })
        );
    }

    #[test]
    fn keyless_first_report_leaves_only_action_column() {
        let table = report_table(&reports(json!([{}, {"Report Id": "r2"}]))).unwrap();
        assert_eq!(table.headers(), &["Check Status"]);
        // The id is not a header, so the button has nothing to act on
        assert_eq!(table.activate(1, 0), None);
    }

    #[test]
    fn missing_keys_render_empty() {
        let table = report_table(&reports(json!([
            {"Report Id": "r1", "Status": "COMPLETED", "Data Path": "report-data/x.json"},
            {"Report Id": "r2", "Status": "PENDING", "Extra": 1}
        ])))
        .unwrap();

        assert_eq!(table.headers().len(), 4);
        assert_eq!(text(&table, 1), vec!["r2", "PENDING", "", "Check Status"]);
    }

    #[test]
    fn rows_keep_their_own_ids_verbatim() {
        let table = report_table(&reports(json!([
            {"Report Id": "r1"},
            {"Report Id": 7}
        ])))
        .unwrap();

        assert_eq!(
            table.activate(1, 1),
            Some(CellAction::CheckStatus {
                report_id: json!(7)
            })
        );
    }
}
