//! Collector configuration, loaded from a TOML file at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// One branch directory entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchEntry {
    pub id: i64,
    pub name: String,
}

/// Top-level collector configuration.
///
/// ```toml
/// bind_addr = "0.0.0.0:8080"
/// database_path = "till.db"
///
/// [[branch]]
/// id = 5
/// name = "Downtown"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Path of the SQLite database file.
    pub database_path: String,
    /// Branch directory entries.
    #[serde(rename = "branch")]
    pub branches: Vec<BranchEntry>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            database_path: "till.db".to_string(),
            branches: Vec::new(),
        }
    }
}

impl CollectorConfig {
    /// Load the configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: CollectorConfig = toml::from_str(
            r#"
            bind_addr = "0.0.0.0:9090"
            database_path = "/var/lib/till/till.db"

            [[branch]]
            id = 5
            name = "Downtown"

            [[branch]]
            id = 9
            name = "Airport"
            "#,
        )
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:9090");
        assert_eq!(config.branches.len(), 2);
        assert_eq!(config.branches[0].id, 5);
        assert_eq!(config.branches[0].name, "Downtown");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: CollectorConfig = toml::from_str("").unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.database_path, "till.db");
        assert!(config.branches.is_empty());
    }
}
