use crate::observability::{HealthChecker, MetricsRecorder};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

/// GET /health/live - Liveness probe
#[tracing::instrument(skip(health_checker))]
pub async fn liveness(State(health_checker): State<Arc<HealthChecker>>) -> impl IntoResponse {
    let status = health_checker.liveness().await;
    Json(status)
}

/// GET /status - Dependency status report
///
/// Always answers 200; the per-dependency values carry the outcome.
#[tracing::instrument(skip(health_checker))]
pub async fn status(State(health_checker): State<Arc<HealthChecker>>) -> impl IntoResponse {
    let report = health_checker.check_health().await;
    Json(report)
}

/// GET /metrics - Prometheus metrics
pub async fn metrics() -> Result<String, StatusCode> {
    MetricsRecorder::export().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
