//! # till-storage
//!
//! SQLite persistence layer for the till collector.
//! WAL mode, write-serialized + read-pooled, forward-only migrations,
//! introspection-driven schema registry, dynamic-record ingestion,
//! branch-wise aggregation.

pub mod aggregate;
pub mod connection;
pub mod engine;
pub mod ingest;
pub mod migrations;
pub mod scan;
pub mod schema;

pub use aggregate::BranchAggregate;
pub use connection::DatabaseManager;
pub use engine::StorageEngine;

/// Dynamic record shape at the ingestion boundary: field name → JSON value.
/// Records stay untyped until after sanitization; the typed layer is the
/// `RecordTable` tag plus the aggregate's branch-id extraction.
pub type RecordMap = serde_json::Map<String, serde_json::Value>;

/// Map any sqlite-layer failure into the storage error taxonomy.
pub(crate) fn sql_err(e: impl std::fmt::Display) -> till_core::StorageError {
    till_core::StorageError::Sqlite {
        message: e.to_string(),
    }
}
