//! UI field → selector catalog for the target case form.

use std::collections::BTreeMap;
use std::path::Path;

use autofill_model::CaseField;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkerError};

/// Selectors of the target form, keyed by canonical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UiFieldMapping {
    field_to_selector: BTreeMap<CaseField, String>,
}

impl Default for UiFieldMapping {
    fn default() -> Self {
        let entries = [
            (CaseField::CaseId, "#caseId"),
            (CaseField::ReactionReportedTerm, "input[name=\"reportedTerm\"]"),
            (CaseField::MeddraLevel, "select#meddraLevel"),
            (CaseField::MeddraTermText, "input[name=\"meddraText\"]"),
            (CaseField::MeddraCode, "input[name=\"meddraCode\"]"),
            (CaseField::MeddraVersion, "input[name=\"meddraVersion\"]"),
            (CaseField::OnsetDate, "input[name=\"onsetDate\"]"),
            (CaseField::Seriousness, "input[name=\"serious\"]"),
            (CaseField::SuspectDrug, "input[name=\"suspectDrug\"]"),
            (CaseField::DoseText, "input[name=\"dose\"]"),
            (CaseField::Outcome, "select#outcome"),
            (CaseField::Narrative, "textarea#narrative"),
        ];
        Self::new(
            entries
                .into_iter()
                .map(|(field, selector)| (field, selector.to_string())),
        )
    }
}

impl UiFieldMapping {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (CaseField, String)>,
    {
        Self {
            field_to_selector: entries.into_iter().collect(),
        }
    }

    /// Load a mapping from a JSON object of `field_name: selector` pairs.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| WorkerError::MappingRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| WorkerError::MappingParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn selector_for(&self, field: CaseField) -> Result<&str> {
        self.field_to_selector
            .get(&field)
            .map(String::as_str)
            .ok_or(WorkerError::UnmappedField { field })
    }

    pub fn is_mapped(&self, field: CaseField) -> bool {
        self.field_to_selector.contains_key(&field)
    }

    /// Mapped fields with their selectors, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (CaseField, &str)> {
        self.field_to_selector
            .iter()
            .map(|(field, selector)| (*field, selector.as_str()))
    }

    pub fn len(&self) -> usize {
        self.field_to_selector.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_to_selector.is_empty()
    }
}
