//! Seriousness vocabulary (advisory).

use autofill_model::{CaseField, CaseRecord};

use crate::issue::Issue;

/// Recognized seriousness values, compared case-insensitively.
pub const SERIOUSNESS_VALUES: [&str; 2] = ["serious", "non-serious"];

pub fn check(record: &CaseRecord) -> Vec<Issue> {
    match record.text(CaseField::Seriousness) {
        Some(value)
            if !SERIOUSNESS_VALUES
                .iter()
                .any(|known| known.eq_ignore_ascii_case(value)) =>
        {
            vec![Issue::UnrecognizedSeriousness {
                value: value.to_string(),
            }]
        }
        _ => vec![],
    }
}
