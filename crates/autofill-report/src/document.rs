//! Serializable batch report.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use autofill_core::{JobItem, ProcessingReport};
use autofill_model::ValidationResult;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ReportError, Result};
use crate::fingerprint::file_sha256;

/// Input file the batch was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub path: String,
    pub sha256: String,
}

impl SourceInfo {
    /// Describe `path`, fingerprinting its current contents.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.display().to_string(),
            sha256: file_sha256(path)?,
        })
    }
}

/// A job that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedJobEntry {
    pub case_id: String,
    pub attempts: u32,
    pub max_attempts: u32,
    pub error_messages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fatal_reason: Option<String>,
}

impl From<&JobItem> for FailedJobEntry {
    fn from(job: &JobItem) -> Self {
        Self {
            case_id: job.case_id().to_string(),
            attempts: job.attempts(),
            max_attempts: job.max_attempts(),
            error_messages: job.error_messages().to_vec(),
            fatal_reason: job.fatal_reason().map(str::to_string),
        }
    }
}

/// A record rejected by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationEntry {
    pub case_id: String,
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl From<&ValidationResult> for ValidationEntry {
    fn from(result: &ValidationResult) -> Self {
        Self {
            case_id: result.case_id().to_string(),
            is_valid: result.is_valid(),
            errors: result.errors().to_vec(),
            warnings: result.warnings().to_vec(),
        }
    }
}

/// Persisted summary of one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    /// RFC 3339 UTC timestamp.
    pub generated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceInfo>,
    pub success_count: usize,
    pub retry_count: usize,
    pub enqueued: usize,
    pub total_attempted: usize,
    pub failed_jobs: Vec<FailedJobEntry>,
    pub validation_errors: Vec<ValidationEntry>,
}

impl ReportDocument {
    pub fn from_report(report: &ProcessingReport, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            source: None,
            success_count: report.success_count,
            retry_count: report.retry_count,
            enqueued: report.enqueued,
            total_attempted: report.total_attempted(),
            failed_jobs: report.failed_jobs.iter().map(FailedJobEntry::from).collect(),
            validation_errors: report
                .validation_errors
                .iter()
                .map(ValidationEntry::from)
                .collect(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: SourceInfo) -> Self {
        self.source = Some(source);
        self
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write `document` as pretty JSON, creating parent directories.
pub fn write_report_json(path: &Path, document: &ReportDocument) -> Result<PathBuf> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    info!(
        path = %path.display(),
        failed_jobs = document.failed_jobs.len(),
        validation_errors = document.validation_errors.len(),
        "report written"
    );
    Ok(path.to_path_buf())
}
