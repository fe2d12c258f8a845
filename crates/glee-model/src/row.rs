//! Row types flowing through the pipeline.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One parsed CSV line, keyed by source header.
///
/// `line` is the 1-based physical line in the file; the header is line 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub line: usize,
    pub values: BTreeMap<String, String>,
}

impl RawRow {
    pub fn new(line: usize, values: BTreeMap<String, String>) -> Self {
        Self { line, values }
    }

    pub fn value(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// True when every cell is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(|value| value.trim().is_empty())
    }
}

/// A coerced value for a target field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// A row transformed into target-field values.
///
/// An empty `errors` list means the row is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedRow {
    pub line: usize,
    pub values: BTreeMap<String, FieldValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ValidatedRow {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            values: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, target: impl Into<String>, value: FieldValue) -> Self {
        self.values.insert(target.into(), value);
        self
    }

    #[must_use]
    pub fn with_text(self, target: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_value(target, FieldValue::Text(value.into()))
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, target: &str) -> Option<&FieldValue> {
        self.values.get(target)
    }

    pub fn text(&self, target: &str) -> Option<&str> {
        self.get(target).and_then(FieldValue::as_text)
    }
}

/// A row rejected by validation, with every error found on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidRow {
    pub row: RawRow,
    pub errors: Vec<String>,
}

impl InvalidRow {
    pub fn line(&self) -> usize {
        self.row.line
    }

    /// Single-line description used in previews: `Line 3: A; B`.
    pub fn describe(&self) -> String {
        format!("Line {}: {}", self.row.line, self.errors.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_row_detection() {
        let mut values = BTreeMap::new();
        values.insert("A".to_string(), "  ".to_string());
        values.insert("B".to_string(), String::new());
        assert!(RawRow::new(2, values.clone()).is_blank());

        values.insert("C".to_string(), "x".to_string());
        assert!(!RawRow::new(2, values).is_blank());
    }

    #[test]
    fn field_value_serializes_untagged() {
        let row = ValidatedRow::new(2)
            .with_text("email", "a@b.co")
            .with_value("class_year", FieldValue::Integer(2027));
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(
            json,
            r#"{"line":2,"values":{"class_year":2027,"email":"a@b.co"}}"#
        );
    }

    #[test]
    fn invalid_row_description() {
        let invalid = InvalidRow {
            row: RawRow::new(4, BTreeMap::new()),
            errors: vec!["Email is required".into(), "Title is required".into()],
        };
        assert_eq!(
            invalid.describe(),
            "Line 4: Email is required; Title is required"
        );
    }
}
