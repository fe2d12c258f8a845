//! `--map TARGET=COLUMN` overrides.

use std::fmt;
use std::str::FromStr;

/// A user-chosen binding given on the command line.
///
/// An empty column (`--map phone=`) explicitly unbinds the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBinding {
    pub target: String,
    pub column: Option<String>,
}

impl ColumnBinding {
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }
}

impl FromStr for ColumnBinding {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (target, column) = value
            .split_once('=')
            .ok_or_else(|| format!("expected TARGET=COLUMN, got '{value}'"))?;
        let target = target.trim();
        if target.is_empty() {
            return Err(format!("missing target field in '{value}'"));
        }
        let column = column.trim();
        Ok(Self {
            target: target.to_string(),
            column: (!column.is_empty()).then(|| column.to_string()),
        })
    }
}

impl fmt::Display for ColumnBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.target, self.column().unwrap_or_default())
    }
}
