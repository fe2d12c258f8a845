//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a record store.
///
/// The `Display` text is what lands in the import summary after
/// `Failed to insert <key>: `.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Write rejected by a constraint (unique key, not-null, ...).
    #[error("{message}")]
    Constraint { message: String },

    /// Backend refused or failed the request.
    #[error("{message}")]
    Backend { message: String },

    /// File I/O error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store file could not be decoded or encoded.
    #[error("store file {path} is not valid JSON: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
