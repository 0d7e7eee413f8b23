//! End-to-end batch runs against a temporary case file.

use std::fs;

use autofill_cli::pipeline::{BatchOptions, run_batch, validate_file};
use autofill_core::{Outcome, worker_fn};
use autofill_worker::{DryRunWorker, UiFieldMapping};
use chrono::NaiveDate;
use tempfile::tempdir;

const CASES: &str = "\
case_id,reaction_term,meddra_code,seriousness,drug_name,onset_date,narrative
C-1,Headache,10019211,serious,Aspirin,2024-02-10,Headache two hours after dose
C-2,Nausea,10028813,non-serious,Ibuprofen,01/03/2024,
C-3,,,unsure,,2024-03-01,Missing reaction term
";

fn options() -> BatchOptions {
    BatchOptions::default().with_reference_date(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
}

#[test]
fn dry_run_submits_valid_cases_and_writes_report() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("cases.csv");
    fs::write(&input, CASES).unwrap();
    let report_path = dir.path().join("out").join("report.json");

    let opts = options().with_report_json(Some(report_path.clone()));
    let result = run_batch(&input, &opts, DryRunWorker::new(UiFieldMapping::default())).unwrap();

    assert_eq!(result.record_count, 3);
    assert_eq!(result.worker, "dry-run");
    assert_eq!(result.report.success_count, 2);
    assert_eq!(result.report.enqueued, 2);
    assert_eq!(result.report.retry_count, 0);
    assert!(result.report.failed_jobs.is_empty());
    assert_eq!(result.report.validation_errors.len(), 1);
    assert_eq!(result.report.validation_errors[0].case_id(), "C-3");
    assert_eq!(result.exit_code(), 0);
    assert_eq!(result.report_json.as_deref(), Some(report_path.as_path()));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(written["success_count"], 2);
    assert_eq!(written["enqueued"], 2);
    assert_eq!(written["total_attempted"], 2);
    assert_eq!(written["failed_jobs"].as_array().unwrap().len(), 0);
    assert_eq!(written["validation_errors"][0]["case_id"], "C-3");
    assert_eq!(
        written["source"]["sha256"].as_str().unwrap().len(),
        64,
        "source fingerprint is a hex SHA-256"
    );
}

#[test]
fn failing_worker_sets_non_zero_exit_code() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("cases.csv");
    fs::write(&input, CASES).unwrap();

    let worker = worker_fn("flaky", |job| {
        if job.case_id() == "C-2" {
            Outcome::Retry
        } else {
            Outcome::Success
        }
    });
    let result = run_batch(&input, &options().with_max_attempts(2), worker).unwrap();

    assert_eq!(result.report.success_count, 1);
    assert_eq!(result.report.retry_count, 2);
    assert_eq!(result.report.failed_jobs.len(), 1);
    assert_eq!(result.report.failed_jobs[0].case_id(), "C-2");
    assert_eq!(result.report.failed_jobs[0].attempts(), 2);
    assert_eq!(result.exit_code(), 1);
}

#[test]
fn validate_only_reports_invalid_and_warnings() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("cases.csv");
    fs::write(&input, CASES).unwrap();

    let run = validate_file(&input, &options()).unwrap();

    assert_eq!(run.results.len(), 3);
    assert_eq!(run.invalid_count(), 1);
    assert_eq!(run.warning_count(), 1);
    assert_eq!(run.exit_code(), 1);
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempdir().unwrap();
    let error = validate_file(&dir.path().join("absent.csv"), &options()).unwrap_err();
    assert!(format!("{error:#}").contains("absent.csv"));
}
