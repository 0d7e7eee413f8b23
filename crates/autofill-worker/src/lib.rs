//! Worker implementations for the autofill orchestrator.
//!
//! - [`DryRunWorker`]: logs intended form fills and always succeeds
//! - [`HttpFormWorker`]: posts each case as JSON to a form endpoint
//! - [`UiFieldMapping`]: field → selector catalog of the target form

mod dry_run;
pub mod error;
mod http;
mod mapping;

pub use dry_run::DryRunWorker;
pub use error::{Result, WorkerError};
pub use http::{CasePayload, HttpFormWorker, HttpWorkerConfig, classify_status};
pub use mapping::UiFieldMapping;

/// Placeholder logged instead of case values unless value logging is enabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";
