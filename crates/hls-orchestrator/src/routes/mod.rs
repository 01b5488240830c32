//! HTTP routes for the HLS orchestrator.
//!
//! Defines the Axum router and application state.

use crate::handlers;
use crate::middleware::http_metrics_middleware;
use crate::repositories::StreamRepository;
use crate::services::PlaylistService;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Playlist service owning the segment registry.
    pub service: Arc<PlaylistService>,
}

/// State for the metrics endpoint.
///
/// Carries the Prometheus handle plus a repository reference so the
/// active-stream gauge can be refreshed at scrape time.
#[derive(Clone)]
pub struct MetricsState {
    /// Prometheus recorder handle for rendering the exposition text.
    pub handle: PrometheusHandle,

    /// Stream repository queried for the active-stream count.
    pub repository: Arc<StreamRepository>,
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/health` - Liveness probe (simple "OK")
/// - `/metrics` - Prometheus metrics endpoint
/// - `/streams/:stream_id/renditions/:rendition/segments` - Announce a segment (POST)
/// - `/streams/:stream_id/renditions/:rendition/playlist.m3u8` - Fetch a media playlist (GET)
/// - `/streams/:stream_id/end` - End a stream across all renditions (POST)
/// - TraceLayer for request logging
/// - HTTP metrics middleware
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>, metrics_state: MetricsState) -> Router {
    let api_routes = Router::new()
        // Health check endpoint (unversioned operational endpoint)
        .route("/health", get(handlers::health_check))
        // Segment ingest and playlist synthesis
        .route(
            "/streams/:stream_id/renditions/:rendition/segments",
            post(handlers::register_segment),
        )
        .route(
            "/streams/:stream_id/renditions/:rendition/playlist.m3u8",
            get(handlers::get_playlist),
        )
        .route("/streams/:stream_id/end", post(handlers::end_stream))
        .with_state(state);

    // Metrics route with its own state
    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_state);

    // Merge routes and apply global middleware layers
    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer - Timeout the request (innermost)
    // 2. TraceLayer - Log request details
    // 3. http_metrics_middleware - Record ALL responses (outermost)
    api_routes
        .merge(metrics_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        // HTTP metrics layer (outermost) captures framework-level
        // errors like 400, 404, 405 as well as handler responses
        .layer(middleware::from_fn(http_metrics_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // This test verifies that AppState implements Clone,
        // which is required for Axum's State extractor.
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_metrics_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<MetricsState>();
    }
}
