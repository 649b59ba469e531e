//! Pending report request form
//!
//! Four string fields edited by the operator. Type fields only accept
//! catalog members; dates are ISO `YYYY-MM-DD`, so comparing them as strings
//! matches calendar order.

use crate::model::{Catalog, ReportRequest};
use thiserror::Error;

/// Editable fields of the request form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    AdType,
    ReportType,
    StartDate,
    EndDate,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::AdType,
        FormField::ReportType,
        FormField::StartDate,
        FormField::EndDate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::AdType => "Ad type",
            FormField::ReportType => "Report type",
            FormField::StartDate => "Start date",
            FormField::EndDate => "End date",
        }
    }

    /// Whether the field picks from a catalog rather than taking free text
    pub fn is_choice(&self) -> bool {
        matches!(self, FormField::AdType | FormField::ReportType)
    }
}

/// Reasons a submission is refused before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    Missing(FormField),

    #[error("Start date {start} is after end date {end}")]
    DateOrder { start: String, end: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingForm {
    ad_type: String,
    report_type: String,
    start_date: String,
    end_date: String,
}

impl PendingForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::AdType => &self.ad_type,
            FormField::ReportType => &self.report_type,
            FormField::StartDate => &self.start_date,
            FormField::EndDate => &self.end_date,
        }
    }

    /// Replace one field. Type values outside the catalog are ignored.
    /// Returns whether the form changed.
    pub fn set(&mut self, field: FormField, value: String, catalog: &Catalog) -> bool {
        let slot = match field {
            FormField::AdType if !catalog.has_ad_type(&value) => return false,
            FormField::ReportType if !catalog.has_report_type(&value) => return false,
            FormField::AdType => &mut self.ad_type,
            FormField::ReportType => &mut self.report_type,
            FormField::StartDate => &mut self.start_date,
            FormField::EndDate => &mut self.end_date,
        };
        *slot = value;
        true
    }

    /// Default both type fields to the first catalog entries
    pub fn seed(&mut self, catalog: &Catalog) {
        if let Some(first) = catalog.ad_types.first() {
            self.ad_type = first.clone();
        }
        if let Some(first) = catalog.report_types.first() {
            self.report_type = first.clone();
        }
    }

    /// Build the request, or explain why it cannot be sent
    pub fn validate(&self) -> Result<ReportRequest, ValidationError> {
        if let Some(field) = FormField::ALL.into_iter().find(|f| self.get(*f).is_empty()) {
            return Err(ValidationError::Missing(field));
        }

        if self.start_date > self.end_date {
            return Err(ValidationError::DateOrder {
                start: self.start_date.clone(),
                end: self.end_date.clone(),
            });
        }

        Ok(ReportRequest {
            ad_type: self.ad_type.clone(),
            report_type: self.report_type.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        })
    }
}
