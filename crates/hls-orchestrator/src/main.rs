//! HLS Orchestrator
//!
//! Entry point for the live-HLS playlist service. Accepts segment
//! announcements from packagers and serves windowed media playlists.

use hls_orchestrator::config::Config;
use hls_orchestrator::observability::metrics::init_metrics_recorder;
use hls_orchestrator::repositories::StreamRepository;
use hls_orchestrator::routes::{self, AppState, MetricsState};
use hls_orchestrator::services::PlaylistService;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting HLS Orchestrator");

    // Load configuration
    let config = Config::from_env();

    info!(
        bind_address = %config.bind_address,
        window_size = config.window_size,
        "Configuration loaded successfully"
    );

    // Install the Prometheus recorder before the first request arrives
    let metrics_handle = init_metrics_recorder().map_err(|e| {
        error!("Failed to initialize metrics recorder: {}", e);
        e
    })?;

    // Create application state
    let repository = Arc::new(StreamRepository::new());
    let service = Arc::new(PlaylistService::new(
        Arc::clone(&repository),
        config.window_size,
    ));
    let state = Arc::new(AppState { service });
    let metrics_state = MetricsState {
        handle: metrics_handle,
        repository,
    };

    // Build application routes
    let app = routes::build_routes(state, metrics_state);

    // Parse bind address
    let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("HLS Orchestrator listening on {}", addr);

    // Start server with graceful shutdown support
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HLS Orchestrator shutdown complete");

    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `LOG_FORMAT=json` selects newline-delimited JSON output for log
/// aggregation; any other value keeps the human-readable format.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hls_orchestrator=info,tower_http=info".into());

    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Listens for shutdown signals (SIGTERM, SIGINT).
/// Returns when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, starting graceful shutdown..."),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, starting graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
