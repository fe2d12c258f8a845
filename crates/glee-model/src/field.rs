//! Target field descriptors.
//!
//! A [`FieldDescriptor`] describes one column an import expects and, once a
//! file has been read, which source header feeds it.

use serde::{Deserialize, Serialize};

/// Semantic type of a target field.
///
/// The kind drives both validation (email shape) and coercion (integers).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text, trimmed on import.
    #[default]
    Text,
    /// Whole number; unparseable values coerce to 0.
    Integer,
    /// Email address, checked for shape and lower-cased.
    Email,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Email => "email",
        }
    }
}

/// One target column of an import and its optional source binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Target field name (e.g. `email`, `first_name`).
    pub target: String,
    /// Human-readable label used in messages and templates.
    pub label: String,
    /// Whether a value must be present for a row to be accepted.
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub kind: FieldKind,
    /// Source CSV header bound to this field.
    #[serde(default)]
    pub source_column: Option<String>,
    /// Set when the binding was chosen by the user. Auto-mapping never
    /// touches a manual binding, including a manual "unbound".
    #[serde(default)]
    pub manual: bool,
}

impl FieldDescriptor {
    pub fn new(target: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
            required: false,
            kind: FieldKind::Text,
            source_column: None,
            manual: false,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn bound_to(mut self, column: impl Into<String>) -> Self {
        self.source_column = Some(column.into());
        self
    }

    pub fn is_bound(&self) -> bool {
        self.source_column.is_some()
    }

    /// A required field with no source column blocks the import.
    pub fn is_missing(&self) -> bool {
        self.required && self.source_column.is_none()
    }
}
