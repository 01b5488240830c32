//! Prometheus scrape endpoint.

use axum::extract::State;
use axum::response::IntoResponse;

use crate::observability::metrics;
use crate::routes::MetricsState;

/// Handler for GET /metrics
///
/// Refreshes the active-stream gauge from the registry, then renders the
/// Prometheus exposition text. Refreshing at scrape time means the gauge
/// reflects the registry as Prometheus observes it, not as of the last
/// mutation.
#[tracing::instrument(skip_all, name = "hls.metrics.scrape")]
pub async fn metrics_handler(State(state): State<MetricsState>) -> impl IntoResponse {
    metrics::set_active_streams(state.repository.active_stream_count().await);
    state.handle.render()
}
