use std::path::PathBuf;

use autofill_core::ProcessingReport;
use autofill_model::ValidationResult;

/// Outcome of `meddra-autofill run`.
#[derive(Debug)]
pub struct BatchResult {
    pub input: PathBuf,
    pub record_count: usize,
    pub max_attempts: u32,
    pub worker: String,
    pub report: ProcessingReport,
    pub report_json: Option<PathBuf>,
}

impl BatchResult {
    /// Batch driver exit status: non-zero when any job failed.
    pub fn exit_code(&self) -> i32 {
        i32::from(self.report.has_failures())
    }
}

/// Outcome of `meddra-autofill validate`.
#[derive(Debug)]
pub struct ValidationRun {
    pub input: PathBuf,
    pub results: Vec<ValidationResult>,
}

impl ValidationRun {
    pub fn invalid_count(&self) -> usize {
        self.results.iter().filter(|r| !r.is_valid()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.results.iter().map(|r| r.warnings().len()).sum()
    }

    pub fn exit_code(&self) -> i32 {
        i32::from(self.invalid_count() > 0)
    }
}
