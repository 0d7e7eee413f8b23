//! Worker capability used by the orchestrator.
//!
//! A worker performs the actual submission of one job. Production
//! submitters, the dry-run worker and test doubles all implement
//! [`Worker`]; the orchestrator only cares about the [`Outcome`].

use crate::job::JobItem;

/// Result of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Submission succeeded; the job is done.
    Success,
    /// Transient failure; requeue while attempts remain.
    Retry,
    /// Permanent failure; never retried.
    Fatal(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Something that can submit a case.
///
/// Implementations own any timeout policy. They may append notes to the
/// job with [`JobItem::note`] but cannot alter its attempt count.
pub trait Worker {
    /// Short identifier used in log output.
    fn name(&self) -> &str {
        "worker"
    }

    /// Submit one job.
    fn process(&mut self, job: &mut JobItem) -> Outcome;
}

impl<W: Worker + ?Sized> Worker for &mut W {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn process(&mut self, job: &mut JobItem) -> Outcome {
        (**self).process(job)
    }
}

impl<W: Worker + ?Sized> Worker for Box<W> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn process(&mut self, job: &mut JobItem) -> Outcome {
        (**self).process(job)
    }
}

/// Worker backed by a closure.
pub struct FnWorker<F> {
    name: String,
    func: F,
}

impl<F> Worker for FnWorker<F>
where
    F: FnMut(&mut JobItem) -> Outcome,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&mut self, job: &mut JobItem) -> Outcome {
        (self.func)(job)
    }
}

/// Build a [`Worker`] from a closure.
pub fn worker_fn<F>(name: impl Into<String>, func: F) -> FnWorker<F>
where
    F: FnMut(&mut JobItem) -> Outcome,
{
    FnWorker {
        name: name.into(),
        func,
    }
}
