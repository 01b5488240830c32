//! Observability for the HLS orchestrator.
//!
//! Provides metrics definitions and instrumentation helpers.

pub mod metrics;
