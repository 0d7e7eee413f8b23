//! Worker that only logs what it would type into the form.

use autofill_core::{JobItem, Outcome, Worker};
use autofill_model::CaseField;
use tracing::{debug, info};

use crate::REDACTED_VALUE;
use crate::mapping::UiFieldMapping;

/// Always succeeds without side effects.
#[derive(Debug, Clone, Default)]
pub struct DryRunWorker {
    mapping: UiFieldMapping,
    log_values: bool,
    processed: usize,
}

impl DryRunWorker {
    pub fn new(mapping: UiFieldMapping) -> Self {
        Self {
            mapping,
            log_values: false,
            processed: 0,
        }
    }

    /// Log field values instead of a redaction placeholder.
    #[must_use]
    pub fn with_log_values(mut self, enable: bool) -> Self {
        self.log_values = enable;
        self
    }

    /// Jobs handled so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Fill actions for a job: `(field, selector, value)` for every mapped
    /// field that has a value.
    pub fn planned_fills<'a>(&'a self, job: &JobItem) -> Vec<(CaseField, &'a str, String)> {
        let record = job.record();
        self.mapping
            .iter()
            .filter_map(|(field, selector)| {
                record
                    .field_value(field)
                    .map(|value| (field, selector, value))
            })
            .collect()
    }
}

impl Worker for DryRunWorker {
    fn name(&self) -> &str {
        "dry-run"
    }

    fn process(&mut self, job: &mut JobItem) -> Outcome {
        let fills = self.planned_fills(job);
        for (field, selector, value) in &fills {
            let shown = if self.log_values {
                value.as_str()
            } else {
                REDACTED_VALUE
            };
            debug!(field = %field, selector, value = shown, "would fill field");
        }
        info!(case_id = %job.case_id(), field_count = fills.len(), "dry run processed job");
        self.processed += 1;
        Outcome::Success
    }
}
