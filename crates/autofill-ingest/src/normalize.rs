//! Column alias resolution and default filling.
//!
//! Source files name the same field differently (`reaction_term`,
//! `reported_term`, ...). The normalizer copies the first non-empty alias
//! value into the canonical column, unless that column already has a value.

use std::collections::BTreeMap;

use autofill_model::{CaseField, RawRow};

/// Default MedDRA level for rows that do not supply one.
pub const DEFAULT_MEDDRA_LEVEL: &str = "PT";

/// Default MedDRA version for rows that do not supply one.
pub const DEFAULT_MEDDRA_VERSION: &str = "MOCK-1.0";

/// Normalizer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerOptions {
    pub default_meddra_level: String,
    pub default_meddra_version: String,
    /// Source column names tried in order for each canonical field.
    pub aliases: BTreeMap<CaseField, Vec<String>>,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        let table: [(CaseField, &[&str]); 9] = [
            (
                CaseField::ReactionReportedTerm,
                &["reaction_reported_term", "reaction_term", "reported_term"],
            ),
            (CaseField::MeddraTermText, &["meddra_term_text", "meddra_text"]),
            (
                CaseField::MeddraCode,
                &["meddra_code", "reaction_code", "llt_code", "pt_code"],
            ),
            (CaseField::Seriousness, &["seriousness", "serious"]),
            (
                CaseField::SuspectDrug,
                &["suspect_drug", "drug_name", "medicinal_product"],
            ),
            (CaseField::DoseText, &["dose_text", "dose", "dose_information"]),
            (CaseField::Outcome, &["outcome", "reaction_outcome"]),
            (CaseField::OnsetDate, &["onset_date", "reaction_onset_date"]),
            (
                CaseField::Narrative,
                &["narrative", "case_narrative", "summary", "indication"],
            ),
        ];
        Self {
            default_meddra_level: DEFAULT_MEDDRA_LEVEL.to_string(),
            default_meddra_version: DEFAULT_MEDDRA_VERSION.to_string(),
            aliases: table
                .into_iter()
                .map(|(field, names)| (field, names.iter().map(|n| (*n).to_string()).collect()))
                .collect(),
        }
    }
}

impl NormalizerOptions {
    #[must_use]
    pub fn with_default_meddra_level(mut self, level: impl Into<String>) -> Self {
        self.default_meddra_level = level.into();
        self
    }

    #[must_use]
    pub fn with_default_meddra_version(mut self, version: impl Into<String>) -> Self {
        self.default_meddra_version = version.into();
        self
    }

    /// Replace the alias list for one field.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, field: CaseField, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases
            .insert(field, names.into_iter().map(Into::into).collect());
        self
    }
}

/// Maps heterogeneous source columns onto canonical field names.
#[derive(Debug, Clone, Default)]
pub struct RecordNormalizer {
    options: NormalizerOptions,
}

impl RecordNormalizer {
    pub fn new(options: NormalizerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizerOptions {
        &self.options
    }

    pub fn normalize_rows<I>(&self, rows: I) -> Vec<RawRow>
    where
        I: IntoIterator<Item = RawRow>,
    {
        rows.into_iter().map(|row| self.normalize_row(row)).collect()
    }

    /// Normalize one row. Original columns are kept; canonical columns
    /// are added or filled when blank.
    pub fn normalize_row(&self, row: RawRow) -> RawRow {
        let mut normalized = row.clone();

        if let Some(term) = self.resolve(&row, CaseField::ReactionReportedTerm) {
            fill(&mut normalized, CaseField::ReactionReportedTerm, &term);
            if let Some(text) = self.resolve(&row, CaseField::MeddraTermText) {
                fill(&mut normalized, CaseField::MeddraTermText, &text);
            }
            fill(&mut normalized, CaseField::MeddraTermText, &term);
        } else if let Some(text) = self.resolve(&row, CaseField::MeddraTermText) {
            fill(&mut normalized, CaseField::MeddraTermText, &text);
        }

        if let Some(code) = self.resolve(&row, CaseField::MeddraCode) {
            fill(&mut normalized, CaseField::MeddraCode, &code);
        }
        fill(
            &mut normalized,
            CaseField::MeddraLevel,
            &self.options.default_meddra_level,
        );
        fill(
            &mut normalized,
            CaseField::MeddraVersion,
            &self.options.default_meddra_version,
        );

        if let Some(value) = self.resolve(&row, CaseField::Seriousness) {
            fill(&mut normalized, CaseField::Seriousness, &canonical_seriousness(&value));
        }

        for field in [
            CaseField::SuspectDrug,
            CaseField::DoseText,
            CaseField::Outcome,
            CaseField::OnsetDate,
            CaseField::Narrative,
        ] {
            if let Some(value) = self.resolve(&row, field) {
                fill(&mut normalized, field, &value);
            }
        }

        normalized
    }

    /// First non-empty alias value for `field`, trimmed.
    fn resolve(&self, row: &RawRow, field: CaseField) -> Option<String> {
        self.options
            .aliases
            .get(&field)?
            .iter()
            .filter_map(|alias| row.get(alias))
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
            .map(str::to_string)
    }
}

/// `serious...` → `Serious`, `non...` → `Non-serious`, anything else unchanged.
pub fn canonical_seriousness(value: &str) -> String {
    let value = value.trim();
    let lower = value.to_lowercase();
    if lower.starts_with("serious") {
        "Serious".to_string()
    } else if lower.starts_with("non") {
        "Non-serious".to_string()
    } else {
        value.to_string()
    }
}

/// Set `field` to `value` unless it already holds a non-blank value.
fn fill(row: &mut RawRow, field: CaseField, value: &str) {
    let slot = row.entry(field.as_str().to_string()).or_default();
    if slot.trim().is_empty() {
        *slot = value.to_string();
    }
}
