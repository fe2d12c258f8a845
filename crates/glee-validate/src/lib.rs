//! Row validation for CSV imports.
//!
//! Rows are checked against the mapped field list and either coerced into
//! [`ValidatedRow`](glee_model::ValidatedRow)s or rejected whole with every
//! error found. A row is never partially accepted.

mod rules;
mod validator;

pub use rules::{INVALID_EMAIL, coerce_integer, is_valid_email, required_message};
pub use validator::{RowValidator, ValidationOutcome, validate};
