//! Error types for worker setup.
//!
//! Failures while submitting a single job are reported as
//! [`autofill_core::Outcome`] values, not through this type.

use std::path::PathBuf;

use autofill_model::CaseField;
use thiserror::Error;

/// Errors raised while configuring a worker.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkerError {
    /// No selector registered for the field.
    #[error("no selector registered for field '{field}'")]
    UnmappedField { field: CaseField },

    /// Mapping file could not be read.
    #[error("failed to read mapping file {path}: {source}")]
    MappingRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Mapping file is not a valid field → selector object.
    #[error("invalid mapping file {path}: {source}")]
    MappingParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Target endpoint is not an http(s) URL.
    #[error("target URL must start with http:// or https://: {url}")]
    InvalidTargetUrl { url: String },

    /// HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Result type for worker setup.
pub type Result<T> = std::result::Result<T, WorkerError>;
