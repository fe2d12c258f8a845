//! Error types for CSV ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end an import session at the parse stage.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the upload limit.
    #[error("file {path} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === CSV Parsing Errors ===
    /// Byte-order mark for an encoding other than UTF-8.
    #[error("unsupported encoding {encoding}; save the file as UTF-8")]
    UnsupportedEncoding { encoding: &'static str },

    /// No header row.
    #[error("CSV file is empty")]
    EmptyCsv,

    /// A header cell is blank.
    #[error("header in column {column} is blank")]
    EmptyHeader { column: usize },

    /// Two header cells name the same column.
    #[error("header '{name}' appears more than once")]
    DuplicateHeader { name: String },

    /// The CSV library rejected the input.
    #[error("{}", match line {
        Some(line) => format!("invalid CSV on line {line}: {message}"),
        None => format!("invalid CSV: {message}"),
    })]
    Csv { line: Option<u64>, message: String },

    // === Output Errors ===
    /// Failed to render CSV output.
    #[error("failed to write CSV: {message}")]
    Write { message: String },
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::Csv {
            line: err.position().map(csv::Position::line),
            message: match err.kind() {
                csv::ErrorKind::Utf8 { .. } => "file is not valid UTF-8".to_string(),
                _ => err.to_string(),
            },
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
