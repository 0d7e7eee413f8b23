//! Batch orchestration: enqueue valid records, drain the queue through a
//! worker, and collect the outcome into a [`ProcessingReport`].

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use autofill_model::ValidationResult;
use tracing::{error, info, info_span, warn};

use crate::error::{CoreError, Result};
use crate::job::{DEFAULT_MAX_ATTEMPTS, JobItem};
use crate::queue::{JobQueue, Requeued};
use crate::report::ProcessingReport;
use crate::worker::{Outcome, Worker};

/// Message recorded on a job each time the worker asks for a retry.
pub const RETRY_MESSAGE: &str = "worker requested retry";

/// Drives one batch through a [`Worker`].
///
/// The orchestrator owns its queue exclusively for the duration of
/// [`Orchestrator::run`]. Dispatch is sequential; no two worker calls
/// overlap.
pub struct Orchestrator<W> {
    queue: JobQueue,
    worker: W,
}

impl<W: Worker> Orchestrator<W> {
    pub fn new(worker: W) -> Self {
        Self::with_max_attempts(worker, DEFAULT_MAX_ATTEMPTS)
    }

    pub fn with_max_attempts(worker: W, max_attempts: u32) -> Self {
        Self {
            queue: JobQueue::with_max_attempts(max_attempts),
            worker,
        }
    }

    pub fn worker(&self) -> &W {
        &self.worker
    }

    pub fn into_worker(self) -> W {
        self.worker
    }

    pub fn max_attempts(&self) -> u32 {
        self.queue.max_attempts()
    }

    /// Run a whole batch.
    ///
    /// Per-job failures end up in the report. An `Err` means the pipeline
    /// itself broke an invariant.
    pub fn run<I>(&mut self, results: I) -> Result<ProcessingReport>
    where
        I: IntoIterator<Item = ValidationResult>,
    {
        let mut report = ProcessingReport::default();
        self.enqueue_valid(results, &mut report);
        self.drain(&mut report)?;
        self.finalize(&mut report)?;
        Ok(report)
    }

    /// Enqueue phase: valid records join the queue, invalid ones go
    /// straight to `validation_errors`. The worker is not touched.
    fn enqueue_valid<I>(&mut self, results: I, report: &mut ProcessingReport)
    where
        I: IntoIterator<Item = ValidationResult>,
    {
        let span = info_span!("enqueue");
        let _guard = span.enter();

        let rejected_before = report.validation_errors.len();
        let enqueued_before = report.enqueued;
        for result in results {
            match result.into_accepted() {
                Ok(record) => {
                    self.queue.enqueue(record);
                    report.enqueued += 1;
                }
                Err(rejected) => report.validation_errors.push(rejected),
            }
        }
        info!(
            enqueued = report.enqueued - enqueued_before,
            rejected = report.validation_errors.len() - rejected_before,
            "enqueue complete"
        );
    }

    fn drain(&mut self, report: &mut ProcessingReport) -> Result<()> {
        let span = info_span!("drain", worker = %self.worker.name());
        let _guard = span.enter();
        let start = Instant::now();

        let pending = self.queue.len();
        let max_attempts = self.queue.max_attempts();
        let budget = pending.saturating_mul(max_attempts as usize);
        let mut dispatched = 0usize;

        while let Some(mut job) = self.queue.dequeue() {
            dispatched += 1;
            if dispatched > budget {
                return Err(CoreError::DispatchBudgetExceeded {
                    dispatched,
                    enqueued: pending,
                    max_attempts,
                });
            }

            let job_span = info_span!(
                "job",
                case_id = %job.case_id(),
                attempt = job.attempts() + 1
            );
            let _job_guard = job_span.enter();

            match dispatch(&mut self.worker, &mut job) {
                Outcome::Success => {
                    report.success_count += 1;
                    info!("job succeeded");
                }
                Outcome::Retry => {
                    report.retry_count += 1;
                    match self.queue.requeue(job, RETRY_MESSAGE) {
                        Requeued::Pending => warn!("worker requested retry"),
                        Requeued::DeadLettered => warn!("worker requested retry; no attempts left"),
                    }
                }
                Outcome::Fatal(reason) => {
                    error!(reason = %reason, "job failed permanently");
                    job.mark_fatal(reason);
                    report.failed_jobs.push(job);
                }
            }
        }

        info!(
            dispatched,
            success_count = report.success_count,
            retry_count = report.retry_count,
            dead_lettered = self.queue.dead_letter().len(),
            duration_ms = start.elapsed().as_millis(),
            "drain complete"
        );
        Ok(())
    }

    fn finalize(&mut self, report: &mut ProcessingReport) -> Result<()> {
        report.failed_jobs.extend(self.queue.take_dead_letter());
        if !report.is_balanced() {
            return Err(CoreError::AccountingMismatch {
                succeeded: report.success_count,
                failed: report.failed_jobs.len(),
                enqueued: report.enqueued,
            });
        }
        info!(
            success_count = report.success_count,
            retry_count = report.retry_count,
            failed_count = report.failed_jobs.len(),
            validation_error_count = report.validation_errors.len(),
            "batch complete"
        );
        Ok(())
    }
}

/// Call the worker, turning a panic into a permanent failure.
fn dispatch<W: Worker>(worker: &mut W, job: &mut JobItem) -> Outcome {
    match catch_unwind(AssertUnwindSafe(|| worker.process(job))) {
        Ok(outcome) => outcome,
        Err(payload) => Outcome::Fatal(format!("worker panicked: {}", panic_message(&*payload))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
