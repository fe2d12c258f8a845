//! Session error types.

use glee_ingest::IngestError;
use glee_map::MappingError;
use glee_model::ModelError;
use thiserror::Error;

use crate::store::StoreError;

/// Errors that stop a session from advancing to its next stage.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The import profile itself is unusable.
    #[error("invalid import profile: {0}")]
    Profile(#[from] ModelError),

    /// The file could not be read as CSV.
    #[error("could not parse the file: {0}")]
    Parse(#[from] IngestError),

    /// A binding was rejected or required fields are unbound.
    #[error("{0}")]
    Mapping(#[from] MappingError),

    /// Rows failed validation and the policy does not allow skipping them.
    #[error("{count} row(s) failed validation")]
    InvalidRows { count: usize, preview: Vec<String> },

    /// The existing-key lookup failed.
    #[error("could not look up existing records: {0}")]
    Store(#[from] StoreError),
}
