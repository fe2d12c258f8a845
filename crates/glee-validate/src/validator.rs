//! Row validator.

use glee_model::{
    FieldDescriptor, FieldKind, FieldValue, InvalidRow, RawRow, Truncated, ValidatedRow, truncate,
};

use crate::rules::{INVALID_EMAIL, coerce_integer, is_valid_email, required_message};

/// Rows partitioned by validity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: Vec<ValidatedRow>,
    pub invalid: Vec<InvalidRow>,
}

impl ValidationOutcome {
    pub fn total(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }

    pub fn is_clean(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Total number of individual errors across invalid rows.
    pub fn error_count(&self) -> usize {
        self.invalid.iter().map(|row| row.errors.len()).sum()
    }

    /// First `limit` invalid rows, one line each, for display.
    pub fn error_preview(&self, limit: usize) -> Truncated<String> {
        truncate(self.invalid.iter().map(InvalidRow::describe), limit)
    }
}

/// Validates rows against a mapped field list.
#[derive(Debug, Clone, Copy)]
pub struct RowValidator<'a> {
    fields: &'a [FieldDescriptor],
}

impl<'a> RowValidator<'a> {
    pub fn new(fields: &'a [FieldDescriptor]) -> Self {
        Self { fields }
    }

    pub fn validate(&self, rows: &[RawRow]) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::default();
        for row in rows {
            let errors = self.check(row);
            if errors.is_empty() {
                outcome.valid.push(self.coerce(row));
            } else {
                tracing::debug!(line = row.line, errors = errors.len(), "row rejected");
                outcome.invalid.push(InvalidRow {
                    row: row.clone(),
                    errors,
                });
            }
        }
        tracing::info!(
            rows = outcome.total(),
            valid = outcome.valid.len(),
            invalid = outcome.invalid.len(),
            "validation complete"
        );
        outcome
    }

    fn bound_fields(&self) -> impl Iterator<Item = (&'a FieldDescriptor, &'a str)> {
        self.fields.iter().filter_map(|field| {
            field
                .source_column
                .as_deref()
                .map(|column| (field, column))
        })
    }

    fn check(&self, row: &RawRow) -> Vec<String> {
        let mut errors = Vec::new();
        for (field, column) in self.bound_fields() {
            let value = row.value(column).map(str::trim).unwrap_or_default();
            if value.is_empty() {
                if field.required {
                    errors.push(required_message(&field.label));
                }
                continue;
            }
            if field.kind == FieldKind::Email && !is_valid_email(value) {
                errors.push(INVALID_EMAIL.to_string());
            }
        }
        errors
    }

    fn coerce(&self, row: &RawRow) -> ValidatedRow {
        let mut validated = ValidatedRow::new(row.line);
        for (field, column) in self.bound_fields() {
            let value = row.value(column).map(str::trim).unwrap_or_default();
            let coerced = match field.kind {
                FieldKind::Integer => FieldValue::Integer(coerce_integer(value)),
                _ if value.is_empty() => continue,
                FieldKind::Email => FieldValue::Text(value.to_lowercase()),
                FieldKind::Text => FieldValue::Text(value.to_string()),
            };
            validated.values.insert(field.target.clone(), coerced);
        }
        validated
    }
}

/// Validates `rows` against `fields`.
pub fn validate(rows: &[RawRow], fields: &[FieldDescriptor]) -> ValidationOutcome {
    RowValidator::new(fields).validate(rows)
}
