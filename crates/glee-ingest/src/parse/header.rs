//! CSV header parsing and normalization.

use std::collections::BTreeSet;

use crate::error::{IngestError, Result};

/// Validated header row of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    /// Column names in file order, trimmed, unique and non-empty.
    pub columns: Vec<String>,
}

impl CsvHeaders {
    /// Validates raw header cells.
    ///
    /// Rejects blank cells and names repeated case-insensitively, so every
    /// later lookup by header name is unambiguous.
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let columns: Vec<String> = cells.into_iter().map(normalize_header).collect();
        if columns.is_empty() || columns.iter().all(String::is_empty) {
            return Err(IngestError::EmptyCsv);
        }
        let mut seen = BTreeSet::new();
        for (idx, column) in columns.iter().enumerate() {
            if column.is_empty() {
                return Err(IngestError::EmptyHeader { column: idx + 1 });
            }
            if !seen.insert(column.to_lowercase()) {
                return Err(IngestError::DuplicateHeader {
                    name: column.clone(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Case-insensitive lookup returning the header as written in the file.
    pub fn find(&self, column: &str) -> Option<&str> {
        let wanted = column.trim();
        self.columns
            .iter()
            .find(|c| c.eq_ignore_ascii_case(wanted))
            .map(String::as_str)
    }
}

/// Normalizes a header value by trimming whitespace and a stray BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim_matches('\u{feff}').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_trimmed() {
        let headers = CsvHeaders::from_cells(["  Title ", "Composer"]).unwrap();
        assert_eq!(headers.columns, vec!["Title", "Composer"]);
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_blank_header_rejected() {
        let result = CsvHeaders::from_cells(["Title", " ", "Voicing"]);
        assert!(matches!(result, Err(IngestError::EmptyHeader { column: 2 })));
    }

    #[test]
    fn test_duplicate_header_rejected() {
        let result = CsvHeaders::from_cells(["Email", "Name", "EMAIL"]);
        assert!(matches!(
            result,
            Err(IngestError::DuplicateHeader { ref name }) if name == "EMAIL"
        ));
    }

    #[test]
    fn test_all_blank_is_empty() {
        let result = CsvHeaders::from_cells(["", ""]);
        assert!(matches!(result, Err(IngestError::EmptyCsv)));
    }

    #[test]
    fn test_find_case_insensitive() {
        let headers = CsvHeaders::from_cells(["FirstName", "Email"]).unwrap();
        assert_eq!(headers.find("email"), Some("Email"));
        assert_eq!(headers.find("phone"), None);
        assert!(headers.contains("Email"));
        assert!(!headers.contains("email"));
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("\u{feff}Title"), "Title");
        assert_eq!(normalize_header("  hello  "), "hello");
    }
}
