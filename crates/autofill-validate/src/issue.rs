//! Validation issue types.
//!
//! The Issue enum provides type-safe issue creation where each variant
//! carries only its needed data.

use autofill_model::CaseField;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Blocks the record from being queued
    Error,
    /// Advisory only
    Warning,
}

impl Severity {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// Validation issue - each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    /// Required field is blank or absent
    MissingField { field: CaseField },
    /// Onset date precedes the earliest accepted date
    OnsetTooEarly { date: NaiveDate, minimum: NaiveDate },
    /// Onset date is after the reference date
    OnsetInFuture { date: NaiveDate, reference: NaiveDate },
    /// Source supplied an onset date that matched no accepted layout
    OnsetUnparseable { raw: String },
    /// MedDRA level outside the accepted set
    InvalidMeddraLevel { value: String },
    /// Exactly one of term text and code was supplied
    MeddraPairIncomplete,
    /// Narrative longer than the form accepts
    NarrativeTooLong { length: usize, max_allowed: usize },
    /// Seriousness value not recognized
    UnrecognizedSeriousness { value: String },
}

impl Issue {
    /// Field the issue is about.
    pub fn field(&self) -> CaseField {
        match self {
            Issue::MissingField { field } => *field,
            Issue::OnsetTooEarly { .. }
            | Issue::OnsetInFuture { .. }
            | Issue::OnsetUnparseable { .. } => CaseField::OnsetDate,
            Issue::InvalidMeddraLevel { .. } => CaseField::MeddraLevel,
            Issue::MeddraPairIncomplete => CaseField::MeddraCode,
            Issue::NarrativeTooLong { .. } => CaseField::Narrative,
            Issue::UnrecognizedSeriousness { .. } => CaseField::Seriousness,
        }
    }

    /// Severity for this issue type.
    pub fn severity(&self) -> Severity {
        match self {
            Issue::UnrecognizedSeriousness { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Format message with issue-specific data.
    pub fn message(&self) -> String {
        match self {
            Issue::MissingField { field } => format!("Missing required field '{field}'"),
            Issue::OnsetTooEarly { date, minimum } => {
                format!("onset_date {date} is earlier than {minimum}")
            }
            Issue::OnsetInFuture { date, reference } => {
                format!("onset_date {date} is in the future (>{reference})")
            }
            Issue::OnsetUnparseable { raw } => {
                format!("onset_date '{raw}' could not be parsed; expected YYYY-MM-DD")
            }
            Issue::InvalidMeddraLevel { value } => {
                format!("meddra_level '{value}' must be one of LLT, PT")
            }
            Issue::MeddraPairIncomplete => {
                "meddra_term_text and meddra_code must be provided together".to_string()
            }
            Issue::NarrativeTooLong { max_allowed, .. } => {
                format!("narrative exceeds {max_allowed} character limit")
            }
            Issue::UnrecognizedSeriousness { value } => format!(
                "seriousness '{value}' not recognized; expected 'Serious' or 'Non-serious'"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_seriousness_is_a_warning() {
        let warning = Issue::UnrecognizedSeriousness {
            value: "unsure".to_string(),
        };
        assert_eq!(warning.severity(), Severity::Warning);
        assert_eq!(Issue::MeddraPairIncomplete.severity(), Severity::Error);
    }

    #[test]
    fn dates_render_in_iso_format() {
        let issue = Issue::OnsetInFuture {
            date: NaiveDate::from_ymd_opt(2030, 1, 2).unwrap(),
            reference: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        };
        assert_eq!(
            issue.message(),
            "onset_date 2030-01-02 is in the future (>2025-06-30)"
        );
    }
}
