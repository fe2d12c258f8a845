#![deny(unsafe_code)]

//! Binding source CSV headers to an import's target fields.
//!
//! [`FieldMapper`] owns the field list for one import session. Auto-mapping
//! suggests bindings (exact match first, then substring); the user can then
//! override any single binding, and those overrides always win.

mod error;
mod mapper;
mod repository;
mod utils;

pub use error::MappingError;
pub use mapper::{FieldMapper, MappingSummary, auto_map};
pub use repository::{MappingRepository, SavedMapping};
pub use utils::compact_key;
