//! Batch outcome counters.

use autofill_model::ValidationResult;

use crate::job::JobItem;

/// Aggregate result of one orchestrator run.
///
/// `retry_count` counts retry events, not jobs, so it may exceed the
/// number of failed jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingReport {
    pub success_count: usize,
    pub retry_count: usize,
    /// Jobs placed on the queue during this run.
    pub enqueued: usize,
    /// Permanently failed and dead-lettered jobs.
    pub failed_jobs: Vec<JobItem>,
    /// Records rejected before reaching the queue.
    pub validation_errors: Vec<ValidationResult>,
}

impl ProcessingReport {
    pub fn total_attempted(&self) -> usize {
        self.success_count + self.retry_count + self.failed_jobs.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed_jobs.is_empty()
    }

    /// Failed jobs that the worker rejected outright.
    pub fn fatal_jobs(&self) -> impl Iterator<Item = &JobItem> {
        self.failed_jobs
            .iter()
            .filter(|job| job.fatal_reason().is_some())
    }

    /// Failed jobs that ran out of retries.
    pub fn dead_lettered_jobs(&self) -> impl Iterator<Item = &JobItem> {
        self.failed_jobs
            .iter()
            .filter(|job| job.fatal_reason().is_none())
    }

    /// Every enqueued job ended as exactly one success or one failure.
    pub fn is_balanced(&self) -> bool {
        self.success_count + self.failed_jobs.len() == self.enqueued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_balanced() {
        let report = ProcessingReport::default();
        assert!(report.is_balanced());
        assert_eq!(report.total_attempted(), 0);
        assert!(!report.has_failures());
    }

    #[test]
    fn total_attempted_counts_retry_events() {
        let report = ProcessingReport {
            success_count: 2,
            retry_count: 3,
            enqueued: 2,
            ..ProcessingReport::default()
        };
        assert_eq!(report.total_attempted(), 5);
        assert!(report.is_balanced());
    }
}
