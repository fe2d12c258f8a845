//! Data model shared by every stage of the import pipeline.
//!
//! The pipeline is configured entirely through an [`ImportProfile`]: the list
//! of [`FieldDescriptor`]s an import expects plus the natural key used to
//! detect records that already exist.

pub mod error;
pub mod field;
pub mod profile;
pub mod row;
pub mod summary;

pub use error::{ModelError, Result};
pub use field::{FieldDescriptor, FieldKind};
pub use profile::{ImportProfile, builtin_profiles, find_profile};
pub use row::{FieldValue, InvalidRow, RawRow, ValidatedRow};
pub use summary::{
    ImportSummary, SUMMARY_ERROR_LIMIT, Truncated, VALIDATION_PREVIEW_LIMIT, truncate,
};
