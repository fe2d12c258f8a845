//! CSV ingestion for the import pipeline.
//!
//! # Features
//!
//! - **Parsing**: raw bytes or a file become validated headers plus one
//!   [`RawRow`](glee_model::RawRow) per non-empty line
//! - **Templates**: a downloadable CSV showing the expected columns
//! - **Export**: stored records written back out as CSV
//!
//! # Example
//!
//! ```ignore
//! use glee_ingest::parse_csv_bytes;
//!
//! let parsed = parse_csv_bytes(b"Title,Composer\nAve Maria,Biebl\n")?;
//! assert_eq!(parsed.headers.columns, vec!["Title", "Composer"]);
//! assert_eq!(parsed.rows.len(), 1);
//! ```

mod error;
mod parse;
mod template;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use parse::{
    CsvHeaders, MAX_CSV_FILE_SIZE, ParsedCsv, check_file_size_with_limit, parse_csv_bytes,
    read_csv_file,
};

// === Template & Export ===
pub use template::{export_csv, template_csv};
