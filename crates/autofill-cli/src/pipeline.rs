//! Batch stages shared by the CLI subcommands.
//!
//! 1. Load and normalize the case file
//! 2. Validate every record against the reference date
//! 3. Drain valid records through a worker
//! 4. Optionally persist the JSON report

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use autofill_core::{DEFAULT_MAX_ATTEMPTS, Orchestrator, Worker};
use autofill_ingest::{NormalizerOptions, RecordNormalizer, load_records};
use autofill_model::ValidationResult;
use autofill_report::{ReportDocument, SourceInfo, write_report_json};
use autofill_validate::CaseValidator;
use chrono::{Local, NaiveDate, Utc};
use tracing::{info, info_span, warn};

use crate::logging::redact_value;
use crate::types::{BatchResult, ValidationRun};

/// Options for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Attempt ceiling per job (at least 1).
    pub max_attempts: u32,
    /// Date treated as "today" by the onset-date check.
    pub reference_date: NaiveDate,
    pub normalizer: NormalizerOptions,
    /// Where to write the JSON report, if anywhere.
    pub report_json: Option<PathBuf>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            reference_date: Local::now().date_naive(),
            normalizer: NormalizerOptions::default(),
            report_json: None,
        }
    }
}

impl BatchOptions {
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    #[must_use]
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    #[must_use]
    pub fn with_normalizer(mut self, normalizer: NormalizerOptions) -> Self {
        self.normalizer = normalizer;
        self
    }

    #[must_use]
    pub fn with_report_json(mut self, path: Option<PathBuf>) -> Self {
        self.report_json = path;
        self
    }
}

/// Load and validate a case file without dispatching anything.
pub fn validate_file(input: &Path, options: &BatchOptions) -> Result<ValidationRun> {
    let results = load_and_validate(input, options)?;
    Ok(ValidationRun {
        input: input.to_path_buf(),
        results,
    })
}

/// Run the full batch through `worker`.
pub fn run_batch<W: Worker>(input: &Path, options: &BatchOptions, worker: W) -> Result<BatchResult> {
    let results = load_and_validate(input, options)?;
    let record_count = results.len();
    let worker_name = worker.name().to_string();

    let report = info_span!("orchestrate", worker = %worker_name).in_scope(|| {
        Orchestrator::with_max_attempts(worker, options.max_attempts)
            .run(results)
            .context("batch aborted")
    })?;

    let report_json = match &options.report_json {
        Some(path) => {
            let source = SourceInfo::from_file(input)
                .with_context(|| format!("fingerprint {}", input.display()))?;
            let document = ReportDocument::from_report(&report, Utc::now()).with_source(source);
            let written = write_report_json(path, &document)
                .with_context(|| format!("write report {}", path.display()))?;
            Some(written)
        }
        None => None,
    };

    Ok(BatchResult {
        input: input.to_path_buf(),
        record_count,
        max_attempts: options.max_attempts,
        worker: worker_name,
        report,
        report_json,
    })
}

fn load_and_validate(input: &Path, options: &BatchOptions) -> Result<Vec<ValidationResult>> {
    let ingest_span = info_span!("ingest", input = %input.display());
    let ingest_start = Instant::now();
    let normalizer = RecordNormalizer::new(options.normalizer.clone());
    let records = ingest_span
        .in_scope(|| load_records(input, &normalizer))
        .with_context(|| format!("load {}", input.display()))?;
    info!(
        record_count = records.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let validator = CaseValidator::new(options.reference_date);
    let results = info_span!("validate").in_scope(|| validator.validate_many(records));
    for result in results.iter().filter(|r| !r.is_valid()) {
        let errors = result.errors().join("; ");
        warn!(
            case_id = %result.case_id(),
            errors = %redact_value(&errors),
            "record rejected"
        );
    }
    Ok(results)
}
