//! Individual validation rules.
//!
//! Every rule runs on every record; findings are collected, never
//! short-circuited.

pub mod meddra;
pub mod narrative;
pub mod onset;
pub mod required;
pub mod seriousness;

use autofill_model::CaseRecord;
use chrono::NaiveDate;

use crate::issue::Issue;

/// Run all rules in reporting order.
pub fn run_all(record: &CaseRecord, reference_date: NaiveDate) -> Vec<Issue> {
    let mut issues = required::check(record);
    issues.extend(onset::check(record, reference_date));
    issues.extend(meddra::check(record));
    issues.extend(narrative::check(record));
    issues.extend(seriousness::check(record));
    issues
}
