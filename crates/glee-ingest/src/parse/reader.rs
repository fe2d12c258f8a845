//! CSV parsing into validated headers and raw rows.

use std::collections::BTreeMap;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use glee_model::RawRow;

use crate::error::{IngestError, Result};

use super::header::CsvHeaders;

/// Maximum file size accepted for an import (10 MB).
pub const MAX_CSV_FILE_SIZE: u64 = 10 * 1024 * 1024;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Headers plus one raw row per non-empty data line.
#[derive(Debug, Clone)]
pub struct ParsedCsv {
    pub headers: CsvHeaders,
    pub rows: Vec<RawRow>,
}

impl ParsedCsv {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| file_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reads and parses a CSV file from disk.
pub fn read_csv_file(path: &Path) -> Result<ParsedCsv> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)?;
    let bytes = std::fs::read(path).map_err(|e| file_error(path, e))?;
    let parsed = parse_csv_bytes(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        columns = parsed.headers.len(),
        rows = parsed.rows.len(),
        "parsed csv file"
    );
    Ok(parsed)
}

/// Parses raw CSV bytes.
///
/// The first record is the header row. Empty lines and lines whose cells
/// are all blank are skipped. Short rows leave trailing columns absent;
/// cells beyond the header width are dropped.
pub fn parse_csv_bytes(bytes: &[u8]) -> Result<ParsedCsv> {
    let bytes = validate_encoding(bytes)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = CsvHeaders::from_cells(reader.headers()?.iter())?;

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let line = record
            .position()
            .map_or(rows.len() + 2, |pos| pos.line() as usize);
        if record.len() > headers.len() {
            tracing::warn!(
                line,
                expected = headers.len(),
                found = record.len(),
                "dropping cells beyond the header row"
            );
        }
        let values: BTreeMap<String, String> = headers
            .columns
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.clone(), value.to_string()))
            .collect();
        let row = RawRow::new(line, values);
        if row.is_blank() {
            continue;
        }
        rows.push(row);
    }

    Ok(ParsedCsv { headers, rows })
}

/// Strips a UTF-8 BOM and rejects UTF-16 input.
fn validate_encoding(bytes: &[u8]) -> Result<&[u8]> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return Ok(rest);
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            encoding: "UTF-16 BE",
        });
    }
    Ok(bytes)
}

fn file_error(path: &Path, e: std::io::Error) -> IngestError {
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
}
