use std::time::Duration;

use anyhow::{Context, Result};
use autofill_core::Worker;
use autofill_ingest::NormalizerOptions;
use autofill_worker::{DryRunWorker, HttpFormWorker, HttpWorkerConfig, UiFieldMapping};
use tracing::info_span;

use autofill_cli::logging::log_data_enabled;
use autofill_cli::pipeline::{BatchOptions, run_batch, validate_file};
use autofill_cli::types::{BatchResult, ValidationRun};

use crate::cli::{InputArgs, RunArgs};

pub fn run_cases(args: &RunArgs) -> Result<BatchResult> {
    let input = &args.input.input;
    let _run_guard = info_span!("run", input = %input.display(), dry_run = args.dry_run).entered();

    let options = batch_options(&args.input)
        .with_max_attempts(args.max_attempts)
        .with_report_json(args.report_json.clone());
    let worker = build_worker(args)?;
    run_batch(input, &options, worker)
}

pub fn run_validate(args: &InputArgs) -> Result<ValidationRun> {
    let _validate_guard = info_span!("validate_only", input = %args.input.display()).entered();
    validate_file(&args.input, &batch_options(args))
}

fn batch_options(args: &InputArgs) -> BatchOptions {
    let normalizer = NormalizerOptions::default()
        .with_default_meddra_level(args.default_meddra_level.clone())
        .with_default_meddra_version(args.default_meddra_version.clone());
    let options = BatchOptions::default().with_normalizer(normalizer);
    match args.reference_date {
        Some(date) => options.with_reference_date(date),
        None => options,
    }
}

fn build_worker(args: &RunArgs) -> Result<Box<dyn Worker>> {
    if args.dry_run {
        let mapping = match &args.mapping {
            Some(path) => UiFieldMapping::from_json_file(path)
                .with_context(|| format!("load mapping {}", path.display()))?,
            None => UiFieldMapping::default(),
        };
        let worker = DryRunWorker::new(mapping).with_log_values(log_data_enabled());
        return Ok(Box::new(worker));
    }

    let url = args
        .target_url
        .clone()
        .context("--target-url is required unless --dry-run is set")?;
    let config = HttpWorkerConfig::new(url).with_timeout(Duration::from_secs(args.timeout_secs));
    let worker = HttpFormWorker::new(config).context("configure HTTP worker")?;
    Ok(Box::new(worker))
}
