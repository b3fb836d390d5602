use crate::{config::DatabaseConfig, errors::Result};
use sqlx::{migrate::Migrator, postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Schema migrations embedded at build time
pub static MIGRATOR: Migrator = sqlx::migrate!("./src/db/migrations");

/// Create the application database pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database pool ready"
    );

    Ok(pool)
}

/// Apply every pending migration
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    let latest = MIGRATOR.iter().map(|m| m.version).max().unwrap_or_default();
    MIGRATOR.run(pool).await?;
    tracing::info!(version = latest, "Database schema up to date");
    Ok(())
}
