//! Batch report output.
//!
//! Converts a [`autofill_core::ProcessingReport`] into a JSON document with
//! the input file's SHA-256 fingerprint, and writes it to disk.

mod document;
mod error;
mod fingerprint;

pub use document::{
    FailedJobEntry, ReportDocument, SourceInfo, ValidationEntry, write_report_json,
};
pub use error::{ReportError, Result};
pub use fingerprint::file_sha256;
