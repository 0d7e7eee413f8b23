//! Retry-aware job queue and batch orchestrator.
//!
//! Valid case records are wrapped in [`JobItem`]s, queued FIFO and handed
//! one at a time to a [`Worker`]. Transient failures are requeued at the
//! tail until `max_attempts` is reached, then dead-lettered. Permanent
//! failures skip the queue and go straight to the report.
//!
//! ```ignore
//! use autofill_core::{Orchestrator, Outcome, worker_fn};
//!
//! let worker = worker_fn("noop", |_job| Outcome::Success);
//! let report = Orchestrator::new(worker).run(validation_results)?;
//! assert!(report.is_balanced());
//! ```

pub mod error;
pub mod job;
pub mod orchestrator;
pub mod queue;
pub mod report;
pub mod worker;

pub use error::{CoreError, Result};
pub use job::{DEFAULT_MAX_ATTEMPTS, JobItem};
pub use orchestrator::{Orchestrator, RETRY_MESSAGE};
pub use queue::{JobQueue, Requeued};
pub use report::ProcessingReport;
pub use worker::{FnWorker, Outcome, Worker, worker_fn};
