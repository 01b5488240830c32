//! Health check handler.
//!
//! Provides the `/health` endpoint for liveness probes. There is no
//! separate readiness probe: the orchestrator has no external dependencies,
//! so "the process is up" and "the process can serve" are the same check.

/// Liveness probe handler.
///
/// Returns a simple "OK" response to indicate the process is running.
/// Does NOT check any dependencies - failure means the process is
/// hung or deadlocked.
pub async fn health_check() -> &'static str {
    "OK"
}
