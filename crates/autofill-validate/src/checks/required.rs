//! Required field presence.

use autofill_model::{CaseField, CaseRecord};

use crate::issue::Issue;

/// Fields that must be populated before a case can be submitted.
pub const REQUIRED_FIELDS: [CaseField; 4] = [
    CaseField::CaseId,
    CaseField::ReactionReportedTerm,
    CaseField::MeddraLevel,
    CaseField::OnsetDate,
];

/// One issue per required field that is absent or blank.
///
/// An onset date that failed to parse counts as missing here; the onset
/// check reports the parse failure separately.
pub fn check(record: &CaseRecord) -> Vec<Issue> {
    REQUIRED_FIELDS
        .into_iter()
        .filter(|field| !is_present(record, *field))
        .map(|field| Issue::MissingField { field })
        .collect()
}

fn is_present(record: &CaseRecord, field: CaseField) -> bool {
    match field {
        CaseField::OnsetDate => record.onset_date.is_some(),
        other => record.text(other).is_some(),
    }
}
