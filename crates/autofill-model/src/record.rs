//! Case records built from normalized source rows.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::field::CaseField;

/// One normalized source row: column name to cell value.
pub type RawRow = BTreeMap<String, String>;

/// Date layouts accepted for `onset_date`, tried in order.
pub const ONSET_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%m/%d/%Y"];

/// A single adverse-event case to be submitted to the target form.
///
/// Records are built once from a row and never mutated afterwards. The
/// original row is retained as `raw_payload` for audit and for columns
/// without a typed attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseRecord {
    /// User-supplied identifier. Not guaranteed unique across a batch.
    pub case_id: String,
    pub reporter_type: Option<String>,
    pub onset_date: Option<NaiveDate>,
    pub reaction_reported_term: Option<String>,
    pub meddra_level: Option<String>,
    pub meddra_term_text: Option<String>,
    pub meddra_code: Option<String>,
    pub meddra_version: Option<String>,
    pub seriousness: Option<String>,
    pub suspect_drug: Option<String>,
    pub dose_text: Option<String>,
    pub outcome: Option<String>,
    pub narrative: Option<String>,
    pub raw_payload: RawRow,
}

impl CaseRecord {
    /// Build a record from a normalized row.
    ///
    /// Text values are trimmed and blank values become `None`. An onset date
    /// that matches none of [`ONSET_DATE_FORMATS`] is left unset; the raw
    /// string stays available through [`CaseRecord::onset_date_raw`].
    pub fn from_row(row: RawRow) -> Self {
        let text = |field: CaseField| clean(row.get(field.as_str()).map(String::as_str));
        Self {
            case_id: row
                .get(CaseField::CaseId.as_str())
                .map(|value| value.trim().to_string())
                .unwrap_or_default(),
            reporter_type: text(CaseField::ReporterType),
            onset_date: text(CaseField::OnsetDate)
                .as_deref()
                .and_then(parse_onset_date),
            reaction_reported_term: text(CaseField::ReactionReportedTerm),
            meddra_level: text(CaseField::MeddraLevel),
            meddra_term_text: text(CaseField::MeddraTermText),
            meddra_code: text(CaseField::MeddraCode),
            meddra_version: text(CaseField::MeddraVersion),
            seriousness: text(CaseField::Seriousness),
            suspect_drug: text(CaseField::SuspectDrug),
            dose_text: text(CaseField::DoseText),
            outcome: text(CaseField::Outcome),
            narrative: text(CaseField::Narrative),
            raw_payload: row,
        }
    }

    /// The non-blank onset date string exactly as the source supplied it.
    pub fn onset_date_raw(&self) -> Option<&str> {
        self.raw_payload
            .get(CaseField::OnsetDate.as_str())
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Trimmed text of a field, `None` when absent or blank.
    ///
    /// `onset_date` is typed, not text; use [`CaseRecord::field_value`] or
    /// [`CaseRecord::onset_date_raw`] for it.
    pub fn text(&self, field: CaseField) -> Option<&str> {
        let value = match field {
            CaseField::CaseId => Some(self.case_id.as_str()),
            CaseField::OnsetDate => None,
            CaseField::ReporterType => self.reporter_type.as_deref(),
            CaseField::ReactionReportedTerm => self.reaction_reported_term.as_deref(),
            CaseField::MeddraLevel => self.meddra_level.as_deref(),
            CaseField::MeddraTermText => self.meddra_term_text.as_deref(),
            CaseField::MeddraCode => self.meddra_code.as_deref(),
            CaseField::MeddraVersion => self.meddra_version.as_deref(),
            CaseField::Seriousness => self.seriousness.as_deref(),
            CaseField::SuspectDrug => self.suspect_drug.as_deref(),
            CaseField::DoseText => self.dose_text.as_deref(),
            CaseField::Outcome => self.outcome.as_deref(),
            CaseField::Narrative => self.narrative.as_deref(),
        };
        value.map(str::trim).filter(|value| !value.is_empty())
    }

    /// Value of a field rendered as text, `None` when absent or blank.
    pub fn field_value(&self, field: CaseField) -> Option<String> {
        match field {
            CaseField::OnsetDate => self
                .onset_date
                .map(|date| date.format("%Y-%m-%d").to_string()),
            other => self.text(other).map(str::to_string),
        }
    }
}

/// Convert a sequence of normalized rows into records.
pub fn records_from_rows<I>(rows: I) -> Vec<CaseRecord>
where
    I: IntoIterator<Item = RawRow>,
{
    rows.into_iter().map(CaseRecord::from_row).collect()
}

/// Parse an onset date using the accepted layouts.
pub fn parse_onset_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    ONSET_DATE_FORMATS
        .iter()
        .filter(|format| has_four_digit_year(value, format))
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// chrono's `%Y` takes any digit count; `24-01-15` must not become year 24.
fn has_four_digit_year(value: &str, format: &str) -> bool {
    let mut parts = value.split(['-', '/']);
    let year = if format.starts_with("%Y") {
        parts.next()
    } else {
        parts.last()
    };
    year.is_some_and(|year| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
}

fn clean(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
