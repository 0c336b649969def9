//! `StorageEngine` — the single owner of the database connections.
//!
//! All reads go through `with_reader()`, all writes through `with_writer()`.
//! No code outside this crate should touch a raw `&Connection`.

use std::path::Path;

use till_core::{BranchDirectory, RecordTable, StorageError};

use crate::aggregate::{self, BranchAggregate};
use crate::connection::DatabaseManager;
use crate::{ingest, scan, schema, RecordMap};

/// The collector's storage engine.
///
/// Each method is one short-lived unit of work against the backend; the
/// engine holds no state beyond the connections themselves, so it is
/// shared freely across request handlers.
pub struct StorageEngine {
    db: DatabaseManager,
}

impl StorageEngine {
    /// Open a file-backed storage engine at the given path.
    /// Runs migrations and applies pragmas.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open(path)?,
        })
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
        })
    }

    /// Sanitize `raw` against the live schema of `table` and append it as
    /// one new row with a server-assigned `received_at`. Returns the
    /// sanitized record that was written.
    ///
    /// Sanitization and insert share one unit of work on the writer, so
    /// the column set the record was filtered against is the column set
    /// it was written under.
    pub fn ingest(&self, table: RecordTable, raw: &RecordMap) -> Result<RecordMap, StorageError> {
        self.db.with_writer(|conn| {
            let clean = ingest::sanitize(conn, table, raw)?;
            ingest::insert_record(conn, table, &clean)?;
            Ok(clean)
        })
    }

    /// Every row of `table` in storage order, `received_at` included.
    pub fn table_rows(&self, table: RecordTable) -> Result<Vec<RecordMap>, StorageError> {
        self.db.with_reader(|conn| scan::scan_table(conn, table))
    }

    /// The branch-wise view over all record tables (see `aggregate`).
    pub fn aggregate_by_branch(
        &self,
        directory: &BranchDirectory,
    ) -> Result<BranchAggregate, StorageError> {
        self.db
            .with_reader(|conn| aggregate::aggregate_by_branch(conn, directory))
    }

    /// Current column set of a record table.
    pub fn table_columns(&self, table: RecordTable) -> Result<Vec<String>, StorageError> {
        self.db.with_reader(|conn| schema::table_columns(conn, table))
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }
}
