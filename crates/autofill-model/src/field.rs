//! Canonical case field names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A canonical column of a case record.
///
/// The string form is the normalized column name used by ingestion, the
/// validator messages and the UI field mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseField {
    CaseId,
    ReporterType,
    ReactionReportedTerm,
    MeddraLevel,
    MeddraTermText,
    MeddraCode,
    MeddraVersion,
    OnsetDate,
    Seriousness,
    SuspectDrug,
    DoseText,
    Outcome,
    Narrative,
}

impl CaseField {
    /// Every field, in form order.
    pub const ALL: [CaseField; 13] = [
        CaseField::CaseId,
        CaseField::ReporterType,
        CaseField::ReactionReportedTerm,
        CaseField::MeddraLevel,
        CaseField::MeddraTermText,
        CaseField::MeddraCode,
        CaseField::MeddraVersion,
        CaseField::OnsetDate,
        CaseField::Seriousness,
        CaseField::SuspectDrug,
        CaseField::DoseText,
        CaseField::Outcome,
        CaseField::Narrative,
    ];

    /// Canonical column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CaseId => "case_id",
            Self::ReporterType => "reporter_type",
            Self::ReactionReportedTerm => "reaction_reported_term",
            Self::MeddraLevel => "meddra_level",
            Self::MeddraTermText => "meddra_term_text",
            Self::MeddraCode => "meddra_code",
            Self::MeddraVersion => "meddra_version",
            Self::OnsetDate => "onset_date",
            Self::Seriousness => "seriousness",
            Self::SuspectDrug => "suspect_drug",
            Self::DoseText => "dose_text",
            Self::Outcome => "outcome",
            Self::Narrative => "narrative",
        }
    }

    /// Parse a canonical column name (case-insensitive, surrounding whitespace ignored).
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for CaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
