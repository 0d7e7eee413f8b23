//! Error types for case file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a case file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Case file not found.
    #[error("case file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    /// Extension other than `.csv`.
    #[error("unsupported file type '{extension}' for {path}; expected .csv")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// File encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}; save the file as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Malformed CSV content.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// File has no header row.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
