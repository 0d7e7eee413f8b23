//! Core data types for MedDRA case autofill.
//!
//! - [`CaseRecord`]: one adverse-event case built from a normalized row
//! - [`CaseField`]: canonical column names shared by ingestion, validation
//!   and the UI field mapping
//! - [`ValidationResult`]: a record paired with its blocking errors and
//!   advisory warnings

pub mod field;
pub mod record;
pub mod validation;

pub use field::CaseField;
pub use record::{CaseRecord, ONSET_DATE_FORMATS, RawRow, parse_onset_date, records_from_rows};
pub use validation::ValidationResult;
