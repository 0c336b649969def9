//! till collector server.
//!
//! Loads the TOML configuration, opens the storage engine, and serves
//! the per-table ingest/retrieval routes plus the branch-wise aggregate.

mod errors;
mod handlers;

use std::path::{Path, PathBuf};

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use till_core::{BranchDirectory, CollectorConfig};
use till_storage::StorageEngine;
use tracing::{info, warn};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = load_config()?;

    let directory = web::Data::new(BranchDirectory::new(&config.branches));
    let engine = web::Data::new(
        StorageEngine::open(Path::new(&config.database_path))
            .with_context(|| format!("opening database {}", config.database_path))?,
    );

    info!(
        addr = %config.bind_addr,
        db = %config.database_path,
        branches = config.branches.len(),
        "till collector listening"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(engine.clone())
            .app_data(directory.clone())
            .configure(handlers::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await?;

    Ok(())
}

/// Config comes from `TILL_CONFIG` if set (missing file is then a hard
/// error), otherwise from `till.toml` next to the process, falling back
/// to defaults when that file does not exist.
fn load_config() -> anyhow::Result<CollectorConfig> {
    if let Some(path) = std::env::var_os("TILL_CONFIG").map(PathBuf::from) {
        return CollectorConfig::load(&path)
            .with_context(|| format!("loading {}", path.display()));
    }

    let default_path = Path::new("till.toml");
    if default_path.exists() {
        CollectorConfig::load(default_path).context("loading till.toml")
    } else {
        warn!("till.toml not found, using defaults (empty branch directory)");
        Ok(CollectorConfig::default())
    }
}
