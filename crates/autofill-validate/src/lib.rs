//! Case record validation.
//!
//! Validation is a pure function of a record and a reference date:
//!
//! - **Required fields**: `case_id`, `reaction_reported_term`, `meddra_level`, `onset_date`
//! - **Onset date**: within `[1970-01-01, reference date]`, and parseable when supplied
//! - **MedDRA level**: `LLT` or `PT` (case-insensitive)
//! - **MedDRA pairing**: term text and code supplied together
//! - **Narrative length**: at most 4000 characters
//! - **Seriousness**: `Serious` / `Non-serious` (warning only)
//!
//! All rules run on every record and all findings are collected.
//!
//! # Example
//!
//! ```ignore
//! use autofill_validate::CaseValidator;
//!
//! let validator = CaseValidator::for_today();
//! let results = validator.validate_many(records);
//! for result in results.iter().filter(|r| !r.is_valid()) {
//!     println!("{}", result.summary());
//! }
//! ```

pub mod checks;
mod issue;

use autofill_model::{CaseRecord, ValidationResult};
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

pub use checks::meddra::ALLOWED_MEDDRA_LEVELS;
pub use checks::narrative::MAX_NARRATIVE_CHARS;
pub use checks::onset::min_onset_date;
pub use checks::required::REQUIRED_FIELDS;
pub use issue::{Issue, Severity};

/// Validates case records against a fixed reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseValidator {
    reference_date: NaiveDate,
}

impl CaseValidator {
    /// Validator that treats `reference_date` as "today".
    pub fn new(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    /// Validator using the local calendar date.
    pub fn for_today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Typed findings for a record, errors and warnings interleaved in rule order.
    pub fn issues(&self, record: &CaseRecord) -> Vec<Issue> {
        checks::run_all(record, self.reference_date)
    }

    /// Validate one record.
    pub fn validate(&self, record: CaseRecord) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for issue in self.issues(&record) {
            match issue.severity() {
                Severity::Error => errors.push(issue.message()),
                Severity::Warning => warnings.push(issue.message()),
            }
        }
        let result = ValidationResult::new(record, errors, warnings);
        debug!(
            case_id = %result.case_id(),
            errors = result.errors().len(),
            warnings = result.warnings().len(),
            "record validated"
        );
        result
    }

    /// Validate records independently, preserving input order.
    pub fn validate_many<I>(&self, records: I) -> Vec<ValidationResult>
    where
        I: IntoIterator<Item = CaseRecord>,
    {
        let results: Vec<ValidationResult> =
            records.into_iter().map(|record| self.validate(record)).collect();
        let invalid = results.iter().filter(|result| !result.is_valid()).count();
        info!(
            record_count = results.len(),
            invalid_count = invalid,
            reference_date = %self.reference_date,
            "validation complete"
        );
        results
    }
}

/// Validate a single record against `reference_date`.
pub fn validate(record: CaseRecord, reference_date: NaiveDate) -> ValidationResult {
    CaseValidator::new(reference_date).validate(record)
}

/// Validate many records against `reference_date`, preserving order.
pub fn validate_many<I>(records: I, reference_date: NaiveDate) -> Vec<ValidationResult>
where
    I: IntoIterator<Item = CaseRecord>,
{
    CaseValidator::new(reference_date).validate_many(records)
}
