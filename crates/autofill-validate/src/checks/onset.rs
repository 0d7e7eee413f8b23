//! Onset date bounds and parse failures.

use autofill_model::CaseRecord;
use chrono::NaiveDate;

use crate::issue::Issue;

/// Earliest onset date accepted by the target system (1970-01-01).
pub fn min_onset_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Check the onset date lies within `[min_onset_date(), reference_date]`.
pub fn check(record: &CaseRecord, reference_date: NaiveDate) -> Vec<Issue> {
    let mut issues = Vec::new();
    let minimum = min_onset_date();

    match (record.onset_date, record.onset_date_raw()) {
        (Some(date), _) => {
            if date < minimum {
                issues.push(Issue::OnsetTooEarly { date, minimum });
            }
            if date > reference_date {
                issues.push(Issue::OnsetInFuture {
                    date,
                    reference: reference_date,
                });
            }
        }
        (None, Some(raw)) => issues.push(Issue::OnsetUnparseable {
            raw: raw.to_string(),
        }),
        (None, None) => {}
    }

    issues
}
