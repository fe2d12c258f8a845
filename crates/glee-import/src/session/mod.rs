//! Import session as a chain of typed stages.
//!
//! Each stage is an immutable snapshot. Moving forward builds the next
//! snapshot and leaves the current one usable, so a failed transition can be
//! retried after the user fixes the mapping or picks another file. Only
//! [`Reconciled::execute`] consumes its stage: once rows are written the
//! session can only [`restart`](Completed::restart).

mod error;
mod stages;

use std::fmt;

pub use error::SessionError;
pub use stages::{Completed, FileSelected, Idle, Mapped, Parsed, Reconciled, Validated};

/// What to do with rows that failed validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvalidRowPolicy {
    /// Refuse to continue while any row is invalid.
    #[default]
    Block,
    /// Continue with the valid rows only.
    SkipInvalid,
}

/// Name of a session stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionStage {
    Idle,
    FileSelected,
    Parsed,
    Mapped,
    Validated,
    Reconciled,
    Completed,
}

impl SessionStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FileSelected => "file selected",
            Self::Parsed => "parsed",
            Self::Mapped => "mapped",
            Self::Validated => "validated",
            Self::Reconciled => "reconciled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for SessionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
