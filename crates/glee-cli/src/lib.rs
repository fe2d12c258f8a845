//! Library components of the `glee` command-line tool.

pub mod binding;
pub mod logging;
pub mod profiles;
