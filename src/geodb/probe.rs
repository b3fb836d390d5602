use crate::{
    config::GeodbConfig,
    errors::{AppError, Result},
    observability::health::LivenessProbe,
};
use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgConnection},
    Connection,
};
use std::time::Duration;

/// Connection options for the geodb service
pub fn connect_options(config: &GeodbConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database)
}

/// Open a throwaway connection to the geodb and run a trivial query.
///
/// Connecting, querying and closing together must finish within
/// `connect_timeout_seconds`.
pub async fn health_check(config: &GeodbConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(AppError::GeodbUnavailable("geodb host is not configured".to_string()));
    }

    let timeout = Duration::from_secs(config.connect_timeout_seconds);

    tokio::time::timeout(timeout, ping(config))
        .await
        .map_err(|_| {
            AppError::GeodbUnavailable(format!(
                "{}:{} did not answer within {:?}",
                config.host, config.port, timeout
            ))
        })?
}

async fn ping(config: &GeodbConfig) -> Result<()> {
    let mut conn = PgConnection::connect_with(&connect_options(config)).await?;

    sqlx::query("SELECT 1").execute(&mut conn).await?;
    conn.close().await?;

    Ok(())
}

/// Liveness probe for the geodb service
pub struct GeodbProbe {
    config: GeodbConfig,
}

impl GeodbProbe {
    pub fn new(config: GeodbConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl LivenessProbe for GeodbProbe {
    async fn is_running(&self) -> bool {
        match health_check(&self.config).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    host = %self.config.host,
                    port = self.config.port,
                    error = %e,
                    "Geodb is not running"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str, port: u16) -> GeodbConfig {
        GeodbConfig {
            host: host.to_string(),
            port,
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            database: "postgres".to_string(),
            connect_timeout_seconds: 2,
        }
    }

    #[test]
    fn test_connect_options() {
        let options = connect_options(&config("geodb", 5433));
        assert_eq!(options.get_host(), "geodb");
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_username(), "postgres");
        assert_eq!(options.get_database(), Some("postgres"));
    }

    #[tokio::test]
    async fn test_unreachable_geodb_is_not_running() {
        let geodb = GeodbProbe::new(config("127.0.0.1", 1));
        assert!(!geodb.is_running().await);
    }

    #[tokio::test]
    async fn test_empty_host_is_not_running() {
        let geodb = GeodbProbe::new(config("", 5432));
        assert!(!geodb.is_running().await);
    }

    #[tokio::test]
    async fn test_stalled_server_times_out() {
        // Accepts the TCP connection but never speaks the protocol.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let mut config = config("127.0.0.1", port);
        config.connect_timeout_seconds = 1;

        let started = std::time::Instant::now();
        let result = health_check(&config).await;
        assert!(matches!(result, Err(AppError::GeodbUnavailable(_))));
        assert!(started.elapsed() < Duration::from_secs(10));

        server.abort();
    }

    #[tokio::test]
    #[ignore] // Requires geodb
    async fn test_running_geodb() {
        let host = std::env::var("GEODB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let geodb = GeodbProbe::new(config(&host, 5432));
        assert!(geodb.is_running().await);
    }
}
