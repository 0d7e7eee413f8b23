//! CSV case file reading.

use std::path::Path;

use autofill_model::RawRow;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Read a `.csv` case file into rows keyed by trimmed header name.
///
/// - Only the `.csv` extension is accepted
/// - UTF-8 with or without BOM; UTF-16 is rejected
/// - Short rows are padded with empty values, extra cells are dropped
/// - Columns with a blank header are ignored
/// - Rows whose values are all empty are skipped
pub fn read_csv_rows(path: &Path) -> Result<Vec<RawRow>> {
    check_extension(path)?;
    let bytes = read_bytes(path)?;
    let content = strip_bom(path, &bytes)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| csv_error(path, source))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record.map_err(|source| csv_error(path, source))?;
        if record.len() > headers.len() {
            warn!(
                path = %path.display(),
                line = record.position().map(csv::Position::line),
                extra = record.len() - headers.len(),
                "row has more cells than headers; extra cells dropped"
            );
        }
        let row: RawRow = headers
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .map(|(idx, name)| (name.clone(), record.get(idx).unwrap_or_default().to_string()))
            .collect();
        if row.values().all(String::is_empty) {
            skipped += 1;
            continue;
        }
        rows.push(row);
    }

    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        skipped_empty = skipped,
        "csv read"
    );
    Ok(rows)
}

fn check_extension(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    if extension.eq_ignore_ascii_case("csv") {
        Ok(())
    } else {
        Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: extension.to_string(),
        })
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Reject UTF-16 and drop a UTF-8 BOM.
fn strip_bom<'a>(path: &Path, bytes: &'a [u8]) -> Result<&'a [u8]> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }
    Ok(bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes))
}

fn csv_error(path: &Path, source: csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    }
}
