use crate::db::ContentTypeCache;
use crate::observability::MetricsRecorder;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Clear the shared content type cache, then hand the request on.
///
/// Only installed when `middleware.reset_caches_per_request` is set: test
/// deployments recreate the database between requests, which leaves cached
/// content type ids pointing at rows that no longer exist.
pub async fn clear_content_type_cache(
    State(cache): State<ContentTypeCache>,
    request: Request,
    next: Next,
) -> Response {
    cache.clear().await;
    MetricsRecorder::record_content_type_cache_clear();

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::ContentType;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn content_type() -> ContentType {
        ContentType {
            id: 1,
            app_label: "core".to_string(),
            model: "project".to_string(),
        }
    }

    #[tokio::test]
    async fn test_cache_is_empty_when_handler_runs() {
        let cache = ContentTypeCache::new();
        cache.insert(content_type()).await;

        let observed = cache.clone();
        let app = Router::new()
            .route(
                "/",
                get(move || {
                    let observed = observed.clone();
                    async move { observed.len().await.to_string() }
                }),
            )
            .layer(middleware::from_fn_with_state(
                cache.clone(),
                clear_content_type_cache,
            ));

        let response = app
            .oneshot(axum::http::Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"0");
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_cache_cleared_on_every_request() {
        let cache = ContentTypeCache::new();
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(
                cache.clone(),
                clear_content_type_cache,
            ));

        for _ in 0..3 {
            cache.insert(content_type()).await;
            let response = app
                .clone()
                .oneshot(axum::http::Request::builder().uri("/").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert!(cache.is_empty().await);
        }
    }
}
