//! Dynamic table model
//!
//! A grid of heterogeneous JSON cells under a header row. Any column can be
//! handed to a [`CellRenderer`], which receives the whole row re-keyed by
//! header (`header[i] -> row[i]`) and decides what the cell shows and what
//! activating it does. Columns without an override show the raw value.
//!
//! The model is terminal-agnostic; `tui::components::table_panel` draws it.

mod reports;

pub use reports::{report_table, CheckStatusButton, CHECK_STATUS_HEADER};

use crate::model::display_value;
use serde_json::{Map, Value};
use std::collections::HashMap;
use unicode_width::UnicodeWidthStr;

/// Widest a column is allowed to grow before its cells get clipped
pub const MAX_COLUMN_WIDTH: u16 = 40;

/// What a cell shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Text(String),
    /// An actionable control, activated with Enter
    Button(String),
}

impl CellContent {
    pub fn text(&self) -> &str {
        match self {
            CellContent::Text(text) | CellContent::Button(text) => text,
        }
    }

    pub fn is_button(&self) -> bool {
        matches!(self, CellContent::Button(_))
    }

    /// Text as drawn in the grid; buttons get brackets
    pub fn display(&self) -> String {
        match self {
            CellContent::Text(text) => text.clone(),
            CellContent::Button(label) => format!("[{}]", label),
        }
    }
}

/// Something the operator asked a cell to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellAction {
    /// Carries the id verbatim, number or string
    CheckStatus { report_id: Value },
}

/// Per-column rendering strategy
pub trait CellRenderer: Send + Sync {
    /// Content for the cell, given the full row keyed by header
    fn render(&self, record: &Map<String, Value>) -> CellContent;

    /// Action to run when the cell is activated, if any
    fn activate(&self, _record: &Map<String, Value>) -> Option<CellAction> {
        None
    }
}

pub struct DynamicTable {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
    overrides: HashMap<usize, Box<dyn CellRenderer>>,
}

impl DynamicTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            headers,
            rows,
            overrides: HashMap::new(),
        }
    }

    /// Render column `column` through `renderer` instead of the raw value
    pub fn with_override(mut self, column: usize, renderer: impl CellRenderer + 'static) -> Self {
        self.overrides.insert(column, Box::new(renderer));
        self
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Row `row` as a record keyed by header; short rows fill with null
    pub fn record(&self, row: usize) -> Map<String, Value> {
        let cells = self.rows.get(row).map(Vec::as_slice).unwrap_or_default();
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.clone(), cells.get(i).cloned().unwrap_or(Value::Null)))
            .collect()
    }

    pub fn cell(&self, row: usize, column: usize) -> CellContent {
        match self.overrides.get(&column) {
            Some(renderer) => renderer.render(&self.record(row)),
            None => {
                let value = self.rows.get(row).and_then(|cells| cells.get(column));
                CellContent::Text(value.map(display_value).unwrap_or_default())
            }
        }
    }

    /// Every cell of one row, in column order
    pub fn row_cells(&self, row: usize) -> Vec<CellContent> {
        (0..self.column_count()).map(|column| self.cell(row, column)).collect()
    }

    /// Run the override for a cell, if it has one and it is actionable
    pub fn activate(&self, row: usize, column: usize) -> Option<CellAction> {
        if row >= self.row_count() {
            return None;
        }
        let renderer = self.overrides.get(&column)?;
        renderer.activate(&self.record(row))
    }

    /// Display width of each column: the widest of header and cells, capped
    pub fn column_widths(&self) -> Vec<u16> {
        (0..self.column_count())
            .map(|column| {
                let header = self.headers[column].width();
                let widest = (0..self.row_count())
                    .map(|row| self.cell(row, column).display().width())
                    .max()
                    .unwrap_or(0);
                let width = header.max(widest).min(MAX_COLUMN_WIDTH as usize);
                width as u16
            })
            .collect()
    }

    /// First column that can hold the activation cursor in `row`
    pub fn first_button_column(&self, row: usize) -> Option<usize> {
        (0..self.column_count()).find(|&column| self.cell(row, column).is_button())
    }
}

impl std::fmt::Debug for DynamicTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut overridden: Vec<_> = self.overrides.keys().copied().collect();
        overridden.sort_unstable();
        f.debug_struct("DynamicTable")
            .field("headers", &self.headers)
            .field("rows", &self.rows.len())
            .field("overrides", &overridden)
            .finish()
    }
}
