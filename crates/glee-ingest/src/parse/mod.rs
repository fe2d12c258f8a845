//! CSV reading utilities.

mod header;
mod reader;

pub use header::CsvHeaders;
pub use reader::{
    MAX_CSV_FILE_SIZE, ParsedCsv, check_file_size_with_limit, parse_csv_bytes, read_csv_file,
};
