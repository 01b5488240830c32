//! Storage seam for stream state.
//!
//! The registry performs every read and write through [`StreamStore`], so its
//! registration and snapshot logic is independent of where state lives. The
//! default [`InMemoryStreamStore`] keeps everything in a process-local map;
//! any keyed backend with read-your-writes consistency can replace it without
//! touching registry call sites.
//!
//! Implementations carry no locking of their own. The registry is the sole
//! caller and serializes all access under its lock.

use std::collections::HashMap;

use crate::models::{StreamId, StreamState};

/// Keyed storage for [`StreamState`] values.
pub trait StreamStore: Send + Sync {
    /// Looks up a stream by id.
    fn get(&self, id: &StreamId) -> Option<&StreamState>;

    /// Looks up a stream by id for in-place mutation.
    fn get_mut(&mut self, id: &StreamId) -> Option<&mut StreamState>;

    /// Inserts or replaces a stream, keyed by the state's own id.
    fn set(&mut self, state: StreamState);

    /// Ids of every known stream, in no particular order.
    fn stream_ids(&self) -> Vec<StreamId>;
}

/// [`StreamStore`] backed by an in-process `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryStreamStore {
    streams: HashMap<StreamId, StreamState>,
}

impl InMemoryStreamStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StreamStore for InMemoryStreamStore {
    fn get(&self, id: &StreamId) -> Option<&StreamState> {
        self.streams.get(id)
    }

    fn get_mut(&mut self, id: &StreamId) -> Option<&mut StreamState> {
        self.streams.get_mut(id)
    }

    fn set(&mut self, state: StreamState) {
        self.streams.insert(state.id.clone(), state);
    }

    fn stream_ids(&self) -> Vec<StreamId> {
        self.streams.keys().cloned().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_for_unknown_stream() {
        let store = InMemoryStreamStore::new();
        assert!(store.get(&StreamId::new("missing")).is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut store = InMemoryStreamStore::new();
        let id = StreamId::new("live-123");
        store.set(StreamState::new(id.clone()));

        let state = store.get(&id).unwrap();
        assert_eq!(state.id, id);
        assert!(!state.ended);
    }

    #[test]
    fn set_replaces_existing_state() {
        let mut store = InMemoryStreamStore::new();
        let id = StreamId::new("live-123");
        store.set(StreamState::new(id.clone()));

        let mut replacement = StreamState::new(id.clone());
        replacement.ended = true;
        store.set(replacement);

        assert!(store.get(&id).unwrap().ended);
    }

    #[test]
    fn get_mut_mutates_in_place() {
        let mut store = InMemoryStreamStore::new();
        let id = StreamId::new("live-123");
        store.set(StreamState::new(id.clone()));

        store.get_mut(&id).unwrap().ended = true;
        assert!(store.get(&id).unwrap().ended);
    }

    #[test]
    fn stream_ids_lists_every_known_stream() {
        let mut store = InMemoryStreamStore::new();
        store.set(StreamState::new(StreamId::new("a")));
        store.set(StreamState::new(StreamId::new("b")));

        let mut ids: Vec<String> = store
            .stream_ids()
            .into_iter()
            .map(|id| id.as_str().to_owned())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
