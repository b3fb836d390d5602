use qfieldcloud_core::{
    api::{create_router, AppState},
    config::Config,
    db::{create_pool, run_migrations},
    health_checker,
    observability::init_tracing,
};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load()?;
    config.validate()?;

    // Initialize tracing/logging
    init_tracing(&config.observability);

    tracing::info!("Starting QFieldCloud service");
    tracing::info!("Configuration loaded: {:?}", config.server);

    // Create database connection pool
    let db_pool = create_pool(&config.database).await?;

    // Run database migrations
    run_migrations(&db_pool).await?;

    let state = AppState::new(db_pool, health_checker(&config)?);
    let app = create_router(state, &config.middleware);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
