//! MedDRA level and term/code pairing.

use autofill_model::{CaseField, CaseRecord};

use crate::issue::Issue;

/// MedDRA hierarchy levels the form accepts.
pub const ALLOWED_MEDDRA_LEVELS: [&str; 2] = ["LLT", "PT"];

pub fn check(record: &CaseRecord) -> Vec<Issue> {
    let mut issues = Vec::new();

    if let Some(level) = record.text(CaseField::MeddraLevel) {
        let known = ALLOWED_MEDDRA_LEVELS
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(level));
        if !known {
            issues.push(Issue::InvalidMeddraLevel {
                value: level.to_string(),
            });
        }
    }

    let has_text = record.text(CaseField::MeddraTermText).is_some();
    let has_code = record.text(CaseField::MeddraCode).is_some();
    if has_text != has_code {
        issues.push(Issue::MeddraPairIncomplete);
    }

    issues
}
