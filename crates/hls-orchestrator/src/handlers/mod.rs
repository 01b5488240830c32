//! HTTP request handlers for the HLS orchestrator.

pub mod health;
pub mod metrics;
pub mod streams;

pub use health::health_check;
pub use metrics::metrics_handler;
pub use streams::{end_stream, get_playlist, register_segment};
