//! # till-core
//!
//! Foundation crate for the till branch-data collector.
//! Defines the record-table set, the branch directory, errors, and
//! configuration. Every other crate in the workspace depends on this.

pub mod branches;
pub mod config;
pub mod errors;
pub mod tables;

// Re-export the most commonly used types at the crate root.
pub use branches::BranchDirectory;
pub use config::{BranchEntry, CollectorConfig};
pub use errors::{ConfigError, StorageError};
pub use tables::RecordTable;
