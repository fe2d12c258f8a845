//! Natural key extraction.

use glee_model::{ImportProfile, ValidatedRow};

/// The business field used to recognise a record that already exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalKey {
    target: String,
}

impl NaturalKey {
    /// Keys rows by the value of one target field.
    pub fn field(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Trimmed, lower-cased key of `row`; `None` when the field is absent or
    /// blank.
    pub fn extract(&self, row: &ValidatedRow) -> Option<String> {
        let value = row.get(&self.target)?.to_string();
        let key = value.trim().to_lowercase();
        (!key.is_empty()).then_some(key)
    }

    /// Key used when reporting on `row`, falling back to its line number.
    pub fn describe(&self, row: &ValidatedRow) -> String {
        self.extract(row)
            .unwrap_or_else(|| format!("line {}", row.line))
    }
}

impl From<&ImportProfile> for NaturalKey {
    fn from(profile: &ImportProfile) -> Self {
        let target = profile
            .field(&profile.natural_key)
            .map_or(profile.natural_key.as_str(), |field| field.target.as_str());
        Self::field(target)
    }
}
