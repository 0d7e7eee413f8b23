//! Queued unit of work.

use autofill_model::CaseRecord;

/// Attempt ceiling used when none is configured.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// A validated case record travelling through the queue.
///
/// `attempts` counts requeues and only the queue changes it. Workers may
/// add diagnostic notes through [`JobItem::note`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobItem {
    record: CaseRecord,
    attempts: u32,
    max_attempts: u32,
    error_messages: Vec<String>,
    fatal_reason: Option<String>,
}

impl JobItem {
    /// Wrap a record with zero attempts. A ceiling of 0 is raised to 1.
    pub fn new(record: CaseRecord, max_attempts: u32) -> Self {
        Self {
            record,
            attempts: 0,
            max_attempts: max_attempts.max(1),
            error_messages: Vec::new(),
            fatal_reason: None,
        }
    }

    pub fn record(&self) -> &CaseRecord {
        &self.record
    }

    pub fn case_id(&self) -> &str {
        &self.record.case_id
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Messages accumulated across retries, oldest first.
    pub fn error_messages(&self) -> &[String] {
        &self.error_messages
    }

    /// Reason given when the worker failed the job permanently.
    pub fn fatal_reason(&self) -> Option<&str> {
        self.fatal_reason.as_deref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    /// Append a diagnostic message without consuming an attempt.
    pub fn note(&mut self, message: impl Into<String>) {
        self.error_messages.push(message.into());
    }

    pub(crate) fn record_retry(&mut self, message: impl Into<String>) {
        self.attempts = self.attempts.saturating_add(1);
        self.error_messages.push(message.into());
    }

    pub(crate) fn mark_fatal(&mut self, reason: impl Into<String>) {
        self.fatal_reason = Some(reason.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(max_attempts: u32) -> JobItem {
        let record = CaseRecord {
            case_id: "C-1".to_string(),
            ..CaseRecord::default()
        };
        JobItem::new(record, max_attempts)
    }

    #[test]
    fn new_job_starts_fresh() {
        let job = job(DEFAULT_MAX_ATTEMPTS);
        assert_eq!(job.attempts(), 0);
        assert!(job.error_messages().is_empty());
        assert!(!job.is_exhausted());
        assert_eq!(job.fatal_reason(), None);
    }

    #[test]
    fn retry_increments_by_one_and_records_message() {
        let mut job = job(2);
        job.record_retry("first");
        assert_eq!(job.attempts(), 1);
        assert!(!job.is_exhausted());
        job.record_retry("second");
        assert_eq!(job.attempts(), 2);
        assert!(job.is_exhausted());
        assert_eq!(job.error_messages(), ["first", "second"]);
    }

    #[test]
    fn note_does_not_consume_an_attempt() {
        let mut job = job(3);
        job.note("timeout after 30s");
        assert_eq!(job.attempts(), 0);
        assert_eq!(job.error_messages().len(), 1);
    }

    #[test]
    fn zero_ceiling_is_raised_to_one() {
        assert_eq!(job(0).max_attempts(), 1);
    }

    #[test]
    fn fatal_leaves_attempts_untouched() {
        let mut job = job(3);
        job.mark_fatal("form rejected");
        assert_eq!(job.attempts(), 0);
        assert_eq!(job.fatal_reason(), Some("form rejected"));
        assert!(job.error_messages().is_empty());
    }
}
