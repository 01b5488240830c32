//! Repository layer for the HLS orchestrator.
//!
//! Owns all stream state, following the handler -> service -> repository
//! layering. Storage itself sits behind the [`store::StreamStore`] seam so
//! the registry logic is independent of where state lives.

pub mod store;
pub mod streams;

pub use store::{InMemoryStreamStore, StreamStore};
pub use streams::StreamRepository;
