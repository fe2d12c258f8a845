use thiserror::Error;

/// Errors raised while building or loading import configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("profile '{profile}' declares no fields")]
    NoFields { profile: String },
    #[error("profile '{profile}' declares field '{target}' more than once")]
    DuplicateField { profile: String, target: String },
    #[error("profile '{profile}' uses natural key '{key}' which is not one of its fields")]
    UnknownNaturalKey { profile: String, key: String },
    #[error("unknown import profile: {0}")]
    UnknownProfile(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
