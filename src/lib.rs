// QFieldCloud core library

pub mod api;
pub mod commands;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod geodb;
pub mod middleware;
pub mod observability;
pub mod storage;

pub use config::Config;
pub use errors::{AppError, Result};

use observability::HealthChecker;
use std::sync::Arc;

/// Health checker wired to the configured geodb and storage bucket
pub fn health_checker(config: &Config) -> Result<HealthChecker> {
    let geodb = geodb::GeodbProbe::new(config.geodb.clone());
    let storage = storage::S3BucketResolver::new(config.storage.clone())?;

    Ok(HealthChecker::new(Arc::new(geodb), Arc::new(storage)))
}
