//! Validation outcome for a single case record.

use crate::record::CaseRecord;

/// Result of validating one [`CaseRecord`].
///
/// Errors block submission; warnings are advisory. A record with no errors
/// is valid regardless of how many warnings it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    record: CaseRecord,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new(record: CaseRecord, errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            record,
            errors,
            warnings,
        }
    }

    pub fn record(&self) -> &CaseRecord {
        &self.record
    }

    pub fn case_id(&self) -> &str {
        &self.record.case_id
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Hand the record over for submission, or give the result back if invalid.
    pub fn into_accepted(self) -> Result<CaseRecord, ValidationResult> {
        if self.is_valid() {
            Ok(self.record)
        } else {
            Err(self)
        }
    }

    /// One-line human readable summary.
    pub fn summary(&self) -> String {
        let id = self.case_id();
        if !self.is_valid() {
            return format!("{id}: invalid - {}", self.errors.join("; "));
        }
        if self.warnings.is_empty() {
            format!("{id}: valid")
        } else {
            format!("{id}: valid with warnings - {}", self.warnings.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> CaseRecord {
        CaseRecord {
            case_id: id.to_string(),
            ..CaseRecord::default()
        }
    }

    #[test]
    fn warnings_do_not_block_validity() {
        let result = ValidationResult::new(record("C-1"), vec![], vec!["odd".to_string()]);
        assert!(result.is_valid());
        assert_eq!(result.summary(), "C-1: valid with warnings - odd");
    }

    #[test]
    fn invalid_result_is_returned_from_into_accepted() {
        let result = ValidationResult::new(
            record("C-2"),
            vec!["a".to_string(), "b".to_string()],
            vec![],
        );
        assert_eq!(result.summary(), "C-2: invalid - a; b");
        let rejected = result.into_accepted().unwrap_err();
        assert_eq!(rejected.errors().len(), 2);
    }

    #[test]
    fn valid_result_yields_record() {
        let result = ValidationResult::new(record("C-3"), vec![], vec![]);
        assert_eq!(result.summary(), "C-3: valid");
        assert_eq!(result.into_accepted().unwrap().case_id, "C-3");
    }
}
