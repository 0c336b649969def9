//! Error taxonomy for the collector.

use std::path::PathBuf;

/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("unknown record table: {table}")]
    TableNotFound { table: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },
}

impl StorageError {
    /// True for backend failures a caller may retry with its own backoff;
    /// false for caller errors such as an unknown table. No retries happen
    /// inside the storage layer itself.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Sqlite { .. })
    }
}

/// Errors raised while loading the collector configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
