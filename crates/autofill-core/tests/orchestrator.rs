//! Batch behavior of the orchestrator and queue.

use std::collections::{BTreeMap, BTreeSet};

use autofill_core::{
    DEFAULT_MAX_ATTEMPTS, JobItem, Orchestrator, Outcome, RETRY_MESSAGE, Worker, worker_fn,
};
use autofill_model::{CaseRecord, RawRow, ValidationResult};
use autofill_validate::validate_many;
use chrono::NaiveDate;
use proptest::prelude::*;

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

fn valid_row(case_id: &str) -> RawRow {
    [
        ("case_id", case_id),
        ("reaction_reported_term", "Nausea"),
        ("meddra_level", "PT"),
        ("meddra_term_text", "Nausea"),
        ("meddra_code", "10028813"),
        ("onset_date", "2024-01-15"),
        ("seriousness", "Serious"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn accepted(case_id: &str) -> ValidationResult {
    ValidationResult::new(CaseRecord::from_row(valid_row(case_id)), vec![], vec![])
}

/// Worker driven by a per-case script of outcomes; the last one repeats.
struct ScriptedWorker {
    script: BTreeMap<String, Vec<Outcome>>,
    calls: Vec<(String, u32)>,
}

impl ScriptedWorker {
    fn new(script: &[(&str, Vec<Outcome>)]) -> Self {
        Self {
            script: script
                .iter()
                .map(|(id, outcomes)| ((*id).to_string(), outcomes.clone()))
                .collect(),
            calls: Vec::new(),
        }
    }
}

impl Worker for ScriptedWorker {
    fn name(&self) -> &str {
        "scripted"
    }

    fn process(&mut self, job: &mut JobItem) -> Outcome {
        self.calls.push((job.case_id().to_string(), job.attempts()));
        let outcomes = self.script.get(job.case_id()).cloned().unwrap_or_default();
        let index = (job.attempts() as usize).min(outcomes.len().saturating_sub(1));
        outcomes.get(index).cloned().unwrap_or(Outcome::Success)
    }
}

#[test]
fn always_retrying_job_is_dead_lettered_after_max_attempts() {
    let mut worker = ScriptedWorker::new(&[("A", vec![Outcome::Retry])]);
    let report = Orchestrator::new(&mut worker)
        .run(vec![accepted("A")])
        .unwrap();

    assert_eq!(report.success_count, 0);
    assert_eq!(report.retry_count, DEFAULT_MAX_ATTEMPTS as usize);
    assert_eq!(report.failed_jobs.len(), 1);
    let job = &report.failed_jobs[0];
    assert_eq!(job.attempts(), DEFAULT_MAX_ATTEMPTS);
    assert!(job.is_exhausted());
    assert_eq!(job.fatal_reason(), None);
    assert!(job.error_messages().iter().all(|m| m == RETRY_MESSAGE));
    assert_eq!(worker.calls.len(), DEFAULT_MAX_ATTEMPTS as usize);
}

#[test]
fn worker_notes_are_kept_alongside_retry_messages() {
    let mut worker = worker_fn("noting", |job: &mut JobItem| {
        job.note("HTTP 503");
        Outcome::Retry
    });
    let report = Orchestrator::with_max_attempts(&mut worker, 2)
        .run(vec![accepted("A")])
        .unwrap();

    let job = &report.failed_jobs[0];
    assert_eq!(job.attempts(), 2);
    assert_eq!(
        job.error_messages(),
        ["HTTP 503", RETRY_MESSAGE, "HTTP 503", RETRY_MESSAGE]
    );
}

#[test]
fn fatal_job_is_never_retried() {
    let mut worker = ScriptedWorker::new(&[
        ("A", vec![Outcome::Fatal("form rejected".to_string())]),
        ("B", vec![Outcome::Success]),
    ]);
    let report = Orchestrator::new(&mut worker)
        .run(vec![accepted("A"), accepted("B")])
        .unwrap();

    assert_eq!(report.success_count, 1);
    assert_eq!(report.retry_count, 0);
    assert_eq!(report.failed_jobs.len(), 1);
    let job = &report.failed_jobs[0];
    assert_eq!(job.case_id(), "A");
    assert_eq!(job.attempts(), 0);
    assert!(job.error_messages().is_empty());
    assert_eq!(job.fatal_reason(), Some("form rejected"));
    assert_eq!(worker.calls.iter().filter(|(id, _)| id == "A").count(), 1);
}

#[test]
fn panicking_worker_fails_only_that_job() {
    let worker = worker_fn("panicky", |job: &mut JobItem| {
        if job.case_id() == "boom" {
            panic!("selector not found");
        }
        Outcome::Success
    });
    let report = Orchestrator::new(worker)
        .run(vec![accepted("boom"), accepted("ok")])
        .unwrap();

    assert_eq!(report.success_count, 1);
    assert_eq!(report.failed_jobs.len(), 1);
    assert_eq!(
        report.failed_jobs[0].fatal_reason(),
        Some("worker panicked: selector not found")
    );
}

#[test]
fn retried_job_cycles_behind_pending_jobs() {
    let mut worker = ScriptedWorker::new(&[
        ("A", vec![Outcome::Retry, Outcome::Success]),
        ("B", vec![Outcome::Success]),
    ]);
    let report = Orchestrator::new(&mut worker)
        .run(vec![accepted("A"), accepted("B")])
        .unwrap();

    assert_eq!(
        worker.calls,
        vec![
            ("A".to_string(), 0),
            ("B".to_string(), 0),
            ("A".to_string(), 1),
        ]
    );
    assert_eq!(report.success_count, 2);
    assert_eq!(report.retry_count, 1);
    assert!(report.failed_jobs.is_empty());
}

#[test]
fn invalid_records_never_reach_the_worker() {
    let mut worker = ScriptedWorker::new(&[]);
    let invalid = ValidationResult::new(
        CaseRecord::default(),
        vec!["Missing required field 'case_id'".to_string()],
        vec![],
    );
    let report = Orchestrator::new(&mut worker).run(vec![invalid]).unwrap();

    assert!(worker.calls.is_empty());
    assert_eq!(report.enqueued, 0);
    assert_eq!(report.validation_errors.len(), 1);
}

#[test]
fn three_record_batch_end_to_end() {
    let mut missing_id = valid_row("");
    missing_id.remove("case_id");
    let records = vec![
        CaseRecord::from_row(valid_row("C-001")),
        CaseRecord::from_row(missing_id),
        CaseRecord::from_row(valid_row("C-003")),
    ];
    let results = validate_many(records, reference());

    let mut worker = ScriptedWorker::new(&[
        ("C-001", vec![Outcome::Success]),
        ("C-003", vec![Outcome::Retry]),
    ]);
    let report = Orchestrator::new(&mut worker).run(results).unwrap();

    assert_eq!(report.success_count, 1);
    assert_eq!(report.validation_errors.len(), 1);
    assert_eq!(
        report.validation_errors[0].errors(),
        ["Missing required field 'case_id'"]
    );
    assert_eq!(report.failed_jobs.len(), 1);
    assert_eq!(report.failed_jobs[0].case_id(), "C-003");
    assert_eq!(report.failed_jobs[0].attempts(), 3);
    // One retry event per dispatch of C-003, the last one dead-letters it.
    assert_eq!(report.retry_count, 3);
    assert_eq!(report.total_attempted(), 5);
    assert_eq!(report.enqueued, 2);
    assert!(report.is_balanced());
    assert!(
        worker
            .calls
            .iter()
            .all(|(id, _)| id == "C-001" || id == "C-003")
    );
}

#[test]
fn reused_orchestrator_does_not_repeat_dead_letters() {
    let mut orchestrator = Orchestrator::new(worker_fn("retry", |_: &mut JobItem| Outcome::Retry));
    let first = orchestrator.run(vec![accepted("A")]).unwrap();
    let second = orchestrator.run(vec![accepted("B")]).unwrap();

    assert_eq!(first.failed_jobs.len(), 1);
    assert_eq!(second.failed_jobs.len(), 1);
    assert_eq!(second.failed_jobs[0].case_id(), "B");
}

#[test]
fn each_run_accounts_only_for_its_own_batch() {
    let mut orchestrator = Orchestrator::new(worker_fn("ok", |_: &mut JobItem| Outcome::Success));
    let rejected = ValidationResult::new(
        CaseRecord::default(),
        vec!["Missing required field 'case_id'".to_string()],
        vec![],
    );

    let first = orchestrator
        .run(vec![accepted("A"), accepted("B"), rejected])
        .unwrap();
    let second = orchestrator.run(vec![accepted("C")]).unwrap();

    assert_eq!((first.enqueued, first.success_count), (2, 2));
    assert_eq!(first.validation_errors.len(), 1);
    assert_eq!((second.enqueued, second.success_count), (1, 1));
    assert!(second.validation_errors.is_empty());
    assert!(first.is_balanced() && second.is_balanced());
}

#[test]
fn duplicate_case_ids_are_processed_independently() {
    let mut seen = 0;
    let mut worker = worker_fn("count", |_: &mut JobItem| {
        seen += 1;
        Outcome::Success
    });
    let report = Orchestrator::new(&mut worker)
        .run(vec![accepted("dup"), accepted("dup")])
        .unwrap();
    drop(worker);
    assert_eq!(report.success_count, 2);
    assert_eq!(seen, 2);
}

fn outcome_strategy() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        3 => Just(Outcome::Success),
        3 => Just(Outcome::Retry),
        1 => "[a-z]{1,8}".prop_map(Outcome::Fatal),
    ]
}

proptest! {
    #[test]
    fn every_enqueued_job_ends_in_exactly_one_terminal_set(
        scripts in proptest::collection::vec(
            proptest::collection::vec(outcome_strategy(), 1..5),
            0..12,
        ),
        max_attempts in 1u32..5,
    ) {
        let ids: Vec<String> = (0..scripts.len()).map(|i| format!("C-{i:03}")).collect();
        let script: Vec<(&str, Vec<Outcome>)> = ids
            .iter()
            .map(String::as_str)
            .zip(scripts.iter().cloned())
            .collect();
        let mut worker = ScriptedWorker::new(&script);
        let results: Vec<ValidationResult> = ids.iter().map(String::as_str).map(accepted).collect();

        let report = Orchestrator::with_max_attempts(&mut worker, max_attempts)
            .run(results)
            .unwrap();

        prop_assert_eq!(report.enqueued, ids.len());
        prop_assert_eq!(report.success_count + report.failed_jobs.len(), ids.len());

        let failed: BTreeSet<&str> = report.failed_jobs.iter().map(JobItem::case_id).collect();
        prop_assert_eq!(failed.len(), report.failed_jobs.len());

        for job in &report.failed_jobs {
            match job.fatal_reason() {
                Some(_) => prop_assert!(job.attempts() < max_attempts),
                None => {
                    prop_assert_eq!(job.attempts(), max_attempts);
                    prop_assert_eq!(job.error_messages().len(), max_attempts as usize);
                }
            }
        }

        let dispatches = worker.calls.len();
        prop_assert_eq!(dispatches, report.success_count + report.retry_count + report.fatal_jobs().count());
        prop_assert!(dispatches <= ids.len() * max_attempts as usize);
    }
}
