//! Writing validated rows to a record store.
//!
//! # Features
//!
//! - **Reconciliation**: rows whose natural key already exists are counted
//!   and dropped before any write ([`partition_duplicates`])
//! - **Stores**: the [`RecordStore`] seam plus in-memory and JSON-file
//!   implementations
//! - **Execution**: sequential inserts where one failed row never stops the
//!   rest of the batch ([`execute_import`])
//! - **Session**: typed stages from file selection to the final summary
//!
//! # Example
//!
//! ```ignore
//! use glee_import::{Idle, InvalidRowPolicy, JsonFileStore};
//!
//! let mut store = JsonFileStore::open("fans.json", "email")?;
//! let validated = Idle::new()
//!     .select_file("fans.csv")
//!     .parse(&profile)?
//!     .map()?
//!     .validate();
//! let completed = validated
//!     .reconcile(&store, InvalidRowPolicy::Block)?
//!     .execute(&mut store, |_, _| {});
//! println!("{} imported", completed.summary().successful);
//! ```

mod executor;
mod key;
mod reconcile;
mod session;
mod store;

pub use executor::execute_import;
pub use key::NaturalKey;
pub use reconcile::{Reconciliation, candidate_keys, partition_duplicates};
pub use session::{
    Completed, FileSelected, Idle, InvalidRowPolicy, Mapped, Parsed, Reconciled, SessionError,
    SessionStage, Validated,
};
pub use store::{JsonFileStore, MemoryStore, RecordStore, StoreError, StoredRecord};
