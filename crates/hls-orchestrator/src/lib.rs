//! HLS Orchestrator Library
//!
//! This library provides the segment registry and playlist synthesis
//! functionality for live HLS delivery: packagers announce finished
//! segments per stream and rendition, players fetch sliding-window
//! media playlists rendered on demand from the in-memory registry.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `middleware` - HTTP middleware
//! - `models` - Data models
//! - `observability` - Metrics recording
//! - `repositories` - Stream state storage layer
//! - `routes` - Router assembly and application state
//! - `services` - Windowing and playlist rendering logic
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
