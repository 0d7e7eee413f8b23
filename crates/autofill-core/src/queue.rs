//! FIFO job queue with tail requeue and a dead-letter list.

use std::collections::VecDeque;

use autofill_model::CaseRecord;
use tracing::{debug, warn};

use crate::job::{DEFAULT_MAX_ATTEMPTS, JobItem};

/// Where a requeued job ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requeued {
    /// Back at the tail of the pending queue.
    Pending,
    /// Retry budget exhausted; moved to the dead-letter list.
    DeadLettered,
}

/// Non-blocking FIFO queue drained synchronously by the orchestrator.
///
/// Retried jobs go to the tail, behind everything currently pending, so a
/// flaky job cannot hold the head of the queue.
#[derive(Debug)]
pub struct JobQueue {
    pending: VecDeque<JobItem>,
    dead_letter: Vec<JobItem>,
    max_attempts: u32,
}

impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl JobQueue {
    pub fn new() -> Self {
        Self::with_max_attempts(DEFAULT_MAX_ATTEMPTS)
    }

    /// Queue whose new jobs carry `max_attempts` (at least 1).
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            pending: VecDeque::new(),
            dead_letter: Vec::new(),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Append a fresh job for `record` to the tail.
    pub fn enqueue(&mut self, record: CaseRecord) {
        debug!(case_id = %record.case_id, "job enqueued");
        self.pending
            .push_back(JobItem::new(record, self.max_attempts));
    }

    /// Pop the head job, `None` when the queue is empty.
    pub fn dequeue(&mut self) -> Option<JobItem> {
        self.pending.pop_front()
    }

    /// Record a failed attempt and either re-append or dead-letter the job.
    pub fn requeue(&mut self, mut job: JobItem, message: impl Into<String>) -> Requeued {
        job.record_retry(message);
        if job.is_exhausted() {
            warn!(
                case_id = %job.case_id(),
                attempts = job.attempts(),
                "retry budget exhausted, job dead-lettered"
            );
            self.dead_letter.push(job);
            Requeued::DeadLettered
        } else {
            debug!(
                case_id = %job.case_id(),
                attempts = job.attempts(),
                "job requeued at tail"
            );
            self.pending.push_back(job);
            Requeued::Pending
        }
    }

    /// Read-only view of dead-lettered jobs.
    pub fn dead_letter(&self) -> &[JobItem] {
        &self.dead_letter
    }

    /// Move all dead-lettered jobs out, leaving the list empty.
    pub fn take_dead_letter(&mut self) -> Vec<JobItem> {
        std::mem::take(&mut self.dead_letter)
    }

    /// Number of pending jobs.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
