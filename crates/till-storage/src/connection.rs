//! `DatabaseManager` — writer + read pool with round-robin selection.
//!
//! The only place in the crate that holds `Mutex<Connection>`. All other
//! code accesses storage through `StorageEngine` methods, which route
//! reads to `with_reader()` and writes to `with_writer()`.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::Connection;
use till_core::StorageError;

use crate::{migrations, sql_err};

/// Number of reader connections for a file-backed database.
const READ_POOL_SIZE: usize = 2;

/// Connection manager: 1 serialized writer + N readers.
///
/// WAL mode is enabled on all connections. SQLite is single-writer, so
/// all writes go through one serialized connection; every insert is
/// atomic at the row level. Round-robin reader selection via an atomic
/// counter.
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    read_index: AtomicUsize,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a file-backed database, apply pragmas, and run migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let writer = Connection::open(path).map_err(sql_err)?;
        configure_connection(&writer)?;
        migrations::run_migrations(&writer)?;

        let mut readers = Vec::with_capacity(READ_POOL_SIZE);
        for _ in 0..READ_POOL_SIZE {
            let reader = Connection::open_with_flags(
                path,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(sql_err)?;
            configure_readonly_connection(&reader)?;
            readers.push(Mutex::new(reader));
        }

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            read_index: AtomicUsize::new(0),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for unit tests).
    ///
    /// A private in-memory database is visible to one connection only, so
    /// `readers` stays empty and `with_reader` falls back to the writer —
    /// every operation shares the single connection.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let writer = Connection::open_in_memory().map_err(sql_err)?;
        configure_connection(&writer)?;
        migrations::run_migrations(&writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Vec::new(),
            read_index: AtomicUsize::new(0),
            path: None,
        })
    }

    /// Execute a closure with the writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&conn)
    }

    /// Execute a closure with a reader connection (round-robin).
    ///
    /// Falls back to the writer if no readers exist (in-memory mode).
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        if self.readers.is_empty() {
            return self.with_writer(f);
        }

        let index = self.read_index.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = self.readers[index]
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&conn)
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Configure a read-write SQLite connection.
///
/// - WAL for concurrent readers during writes
/// - busy_timeout for lock contention
/// - NORMAL synchronous for the WAL durability trade-off
/// - foreign_keys stays OFF: identifiers on record tables are producer
///   conventions, not constraints
fn configure_connection(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(sql_err)
}

/// Same pragmas plus `query_only = ON` to prevent accidental writes
/// through a pooled reader.
fn configure_readonly_connection(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA temp_store = MEMORY;
        PRAGMA query_only = ON;
        ",
    )
    .map_err(sql_err)
}
