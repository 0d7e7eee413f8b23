//! Error types for the batch pipeline.
//!
//! Per-job worker failures are data ([`crate::Outcome`]), not errors. The
//! variants here are invariant violations that abort the whole batch.

use thiserror::Error;

/// Errors that abort a batch run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// Drain loop dispatched more jobs than the retry ceiling allows.
    #[error("dispatch budget exceeded: {dispatched} dispatches for {enqueued} jobs with max_attempts {max_attempts}")]
    DispatchBudgetExceeded {
        /// Dispatches performed so far.
        dispatched: usize,
        /// Jobs enqueued in this run.
        enqueued: usize,
        /// Per-job attempt ceiling.
        max_attempts: u32,
    },

    /// Jobs left unaccounted for after the queue drained.
    #[error("job accounting mismatch: {succeeded} succeeded + {failed} failed != {enqueued} enqueued")]
    AccountingMismatch {
        succeeded: usize,
        failed: usize,
        enqueued: usize,
    },
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, CoreError>;
