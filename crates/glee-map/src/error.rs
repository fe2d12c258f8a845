//! Error types for mapping operations.

use std::fmt;

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Field index outside the field list.
    FieldIndexOutOfRange { index: usize, len: usize },
    /// No field with this target name.
    UnknownField(String),
    /// Column not found in source headers.
    ColumnNotFound(String),
    /// Required fields without a bound column.
    MissingRequired { labels: Vec<String> },
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldIndexOutOfRange { index, len } => {
                write!(f, "Field index {index} out of range ({len} fields)")
            }
            Self::UnknownField(target) => write!(f, "Unknown field: {target}"),
            Self::ColumnNotFound(c) => write!(f, "Column not found: {c}"),
            Self::MissingRequired { labels } => {
                write!(f, "Required fields are not mapped: {}", labels.join(", "))
            }
        }
    }
}

impl std::error::Error for MappingError {}
