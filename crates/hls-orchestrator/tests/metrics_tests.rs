//! Metrics endpoint integration tests.
//!
//! Installs the real Prometheus recorder and drives stream traffic through
//! the router, then asserts on the rendered exposition text. A single test
//! function owns the whole lifecycle because the recorder is process-global
//! and can only be installed once.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use hls_orchestrator::observability::metrics::init_metrics_recorder;
use hls_orchestrator::repositories::StreamRepository;
use hls_orchestrator::routes::{self, AppState, MetricsState};
use hls_orchestrator::services::PlaylistService;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

async fn send(app: &Router, method: &str, uri: &str, body: Body) -> Result<u16, anyhow::Error> {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body)?,
        )
        .await?;
    Ok(response.status().as_u16())
}

/// Test that a scrape reports lifecycle counters, HTTP request counters,
/// and an active-stream gauge refreshed from the registry.
#[tokio::test]
async fn test_metrics_scrape_reports_service_activity() -> Result<(), anyhow::Error> {
    let handle = init_metrics_recorder().map_err(anyhow::Error::msg)?;

    let repository = Arc::new(StreamRepository::new());
    let service = Arc::new(PlaylistService::new(Arc::clone(&repository), 6));
    let state = Arc::new(AppState { service });
    let metrics_state = MetricsState { handle, repository };
    let app = routes::build_routes(state, metrics_state);

    // Two streams come up, one of them ends
    for (stream, sequence) in [("live-1", 1), ("live-1", 2), ("live-2", 10)] {
        let body = serde_json::json!({
            "sequence": sequence,
            "duration": 2.0,
            "path": format!("/segments/{sequence}.ts"),
        })
        .to_string();
        let uri = format!("/streams/{stream}/renditions/720p/segments");
        assert_eq!(send(&app, "POST", &uri, Body::from(body)).await?, 201);
    }
    assert_eq!(
        send(&app, "POST", "/streams/live-2/end", Body::empty()).await?,
        200
    );

    // One rejected registration feeds the error counter
    let rejected = serde_json::json!({
        "sequence": 11, "duration": 2.0, "path": "/segments/11.ts",
    })
    .to_string();
    assert_eq!(
        send(
            &app,
            "POST",
            "/streams/live-2/renditions/720p/segments",
            Body::from(rejected)
        )
        .await?,
        409
    );

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await?.to_bytes();
    let exposition = String::from_utf8(bytes.to_vec())?;

    assert!(exposition.contains("hls_segments_registered_total 3"));
    assert!(exposition.contains("hls_streams_ended_total 1"));
    assert!(exposition.contains("hls_active_streams 1"));
    assert!(exposition.contains("hls_http_requests_total{"));
    assert!(exposition.contains("hls_http_request_duration_seconds"));
    assert!(exposition.contains("hls_http_errors_total 1"));

    Ok(())
}
