//! Health endpoint integration tests.
//!
//! Exercises `/health` through the full router so the global middleware
//! stack (tracing, timeout, HTTP metrics) is in the request path.
//!
//! Note: `/health` returns plain text "OK" for liveness probes.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use hls_orchestrator::repositories::StreamRepository;
use hls_orchestrator::routes::{self, AppState, MetricsState};
use hls_orchestrator::services::PlaylistService;
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tower::ServiceExt;

/// Builds the application router backed by a fresh in-memory registry.
fn test_router() -> Router {
    let repository = Arc::new(StreamRepository::new());
    let service = Arc::new(PlaylistService::new(Arc::clone(&repository), 6));
    let state = Arc::new(AppState { service });
    let recorder = PrometheusBuilder::new().build_recorder();
    let metrics_state = MetricsState {
        handle: recorder.handle(),
        repository,
    };
    routes::build_routes(state, metrics_state)
}

/// Test that /health liveness endpoint returns 200 and plain text "OK".
#[tokio::test]
async fn test_health_endpoint_returns_200() -> Result<(), anyhow::Error> {
    let app = test_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await?.to_bytes();
    assert_eq!(String::from_utf8(body.to_vec())?, "OK");

    Ok(())
}

/// Test that non-existent routes return 404.
#[tokio::test]
async fn test_unknown_route_returns_404() -> Result<(), anyhow::Error> {
    let app = test_router();

    let response = app
        .oneshot(Request::builder().uri("/v1/nonexistent").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Test that an unsupported method on a known route returns 405.
#[tokio::test]
async fn test_wrong_method_returns_405() -> Result<(), anyhow::Error> {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/health")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    Ok(())
}
