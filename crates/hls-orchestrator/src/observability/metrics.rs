//! Metrics definitions for the HLS orchestrator.
//!
//! All metrics follow Prometheus naming conventions:
//! - `hls_` prefix for this service
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded to prevent cardinality explosion:
//! - `method`: a handful of HTTP verbs
//! - `endpoint`: route templates only, never raw paths with stream ids
//! - `status`: 3 values (success, error, timeout)

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics recorder and return the handle
/// for serving metrics via HTTP.
///
/// Must be called once at startup, before any metrics are recorded.
///
/// # Errors
///
/// Returns error if the Prometheus recorder fails to install (e.g., already
/// installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("hls_http_request".to_string()),
            &[
                0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000, 2.000,
            ],
        )
        .map_err(|e| format!("Failed to set HTTP request buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

// ============================================================================
// HTTP Request Metrics
// ============================================================================

/// Record HTTP request completion
///
/// Metrics: `hls_http_requests_total`, `hls_http_request_duration_seconds`,
/// and `hls_http_errors_total` for responses with status >= 400.
/// Labels: `method`, `endpoint`, `status`/`status_code`
///
/// This captures ALL HTTP responses, including framework-level errors such
/// as 404 Not Found and 405 Method Not Allowed.
pub fn record_http_request(method: &str, endpoint: &str, status_code: u16, duration: Duration) {
    // Normalize endpoint to prevent cardinality explosion
    let normalized_endpoint = normalize_endpoint(endpoint);

    let status = categorize_status_code(status_code);

    histogram!("hls_http_request_duration_seconds",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint.clone(),
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());

    counter!("hls_http_requests_total",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint,
        "status_code" => status_code.to_string()
    )
    .increment(1);

    if status_code >= 400 {
        counter!("hls_http_errors_total").increment(1);
    }
}

/// Categorize HTTP status code into success/error/timeout
fn categorize_status_code(status_code: u16) -> &'static str {
    match status_code {
        200..=299 => "success",
        408 | 504 => "timeout",
        _ => "error",
    }
}

/// Normalize endpoint path to prevent label cardinality explosion
///
/// Replaces stream and rendition ids with placeholders.
fn normalize_endpoint(path: &str) -> String {
    match path {
        "/health" => "/health".to_string(),
        "/metrics" => "/metrics".to_string(),
        _ => normalize_stream_endpoint(path),
    }
}

/// Normalize stream endpoints carrying dynamic path segments.
fn normalize_stream_endpoint(path: &str) -> String {
    if path.starts_with("/streams/") {
        let parts: Vec<&str> = path.split('/').collect();

        // /streams/{stream_id}/end → parts.len() == 4
        if parts.len() == 4 && parts.get(3) == Some(&"end") {
            return "/streams/{stream_id}/end".to_string();
        }

        // /streams/{stream_id}/renditions/{rendition}/... → parts.len() == 6
        if parts.len() == 6 && parts.get(3) == Some(&"renditions") {
            match parts.get(5) {
                Some(&"segments") => {
                    return "/streams/{stream_id}/renditions/{rendition}/segments".to_string();
                }
                Some(&"playlist.m3u8") => {
                    return "/streams/{stream_id}/renditions/{rendition}/playlist.m3u8".to_string();
                }
                _ => {}
            }
        }
    }

    // Unknown paths normalized to "/other" to bound cardinality
    "/other".to_string()
}

// ============================================================================
// Stream Lifecycle Metrics
// ============================================================================

/// Record one accepted segment registration.
///
/// Metric: `hls_segments_registered_total`
///
/// Counts every successful registration, duplicates included: a duplicate
/// is an accepted no-op, not a failure.
pub fn record_segment_registered() {
    counter!("hls_segments_registered_total").increment(1);
}

/// Record one end-stream call.
///
/// Metric: `hls_streams_ended_total`
///
/// Counts every call, idempotent repeats included.
pub fn record_stream_ended() {
    counter!("hls_streams_ended_total").increment(1);
}

/// Set the active (not ended) stream count.
///
/// Metric: `hls_active_streams`
/// Type: Gauge
///
/// Refreshed from the registry on each `/metrics` scrape.
#[allow(clippy::cast_precision_loss)]
pub fn set_active_streams(count: usize) {
    gauge!("hls_active_streams").set(count as f64);
}

// ============================================================================
// Tests
// ============================================================================
