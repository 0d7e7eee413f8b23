//! Narrative length limit.

use autofill_model::CaseRecord;

use crate::issue::Issue;

/// Maximum narrative length in characters.
pub const MAX_NARRATIVE_CHARS: usize = 4000;

pub fn check(record: &CaseRecord) -> Vec<Issue> {
    let Some(narrative) = record.narrative.as_deref() else {
        return vec![];
    };
    let length = narrative.chars().count();
    if length > MAX_NARRATIVE_CHARS {
        vec![Issue::NarrativeTooLong {
            length,
            max_allowed: MAX_NARRATIVE_CHARS,
        }]
    } else {
        vec![]
    }
}
