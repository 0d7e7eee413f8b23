//! Case file ingestion.
//!
//! - **CSV Loading**: read a UTF-8 `.csv` case file into raw rows
//! - **Normalization**: resolve column aliases and fill MedDRA defaults
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use autofill_ingest::{RecordNormalizer, load_records};
//!
//! let records = load_records(Path::new("cases.csv"), &RecordNormalizer::default())?;
//! ```

mod error;
mod normalize;
mod reader;

use std::path::Path;

use autofill_model::{CaseRecord, records_from_rows};
use tracing::info;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::read_csv_rows;

// === Normalization ===
pub use normalize::{
    DEFAULT_MEDDRA_LEVEL, DEFAULT_MEDDRA_VERSION, NormalizerOptions, RecordNormalizer,
    canonical_seriousness,
};

/// Read, normalize and convert a case file into records.
pub fn load_records(path: &Path, normalizer: &RecordNormalizer) -> Result<Vec<CaseRecord>> {
    let rows = read_csv_rows(path)?;
    let records = records_from_rows(normalizer.normalize_rows(rows));
    info!(
        path = %path.display(),
        record_count = records.len(),
        "case file loaded"
    );
    Ok(records)
}
