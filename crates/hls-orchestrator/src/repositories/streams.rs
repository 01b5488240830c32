//! Segment registry: the sole owner and mutator of stream state.
//!
//! All mutation and every multi-field read pass through [`StreamRepository`],
//! so readers never observe a partially-updated stream/rendition pair. A
//! single store-wide `RwLock` guards everything: writers take exclusive
//! access and readers share, which makes the cascading end-stream write
//! atomic with respect to any concurrent snapshot. Lock hold times are
//! bounded by map operations and one copy of a rendition's segment list.

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::RegistryError;
use crate::models::{
    NewSegment, RenditionId, RenditionSnapshot, RenditionState, Segment, StreamId, StreamState,
};
use crate::repositories::store::{InMemoryStreamStore, StreamStore};

/// Concurrency-safe registry of every known stream.
pub struct StreamRepository {
    store: RwLock<Box<dyn StreamStore>>,
}

impl StreamRepository {
    /// Creates a repository over the default in-memory store.
    pub fn new() -> Self {
        Self::with_store(InMemoryStreamStore::new())
    }

    /// Creates a repository over a specific store backend.
    pub fn with_store(store: impl StreamStore + 'static) -> Self {
        Self {
            store: RwLock::new(Box::new(store)),
        }
    }

    /// Records a segment for the given stream and rendition, materializing
    /// both on first contact.
    ///
    /// Re-registering an existing sequence succeeds as a no-op: duplicates
    /// are expected redelivery, and the first registration wins. Fails only
    /// when the stream or rendition has already ended.
    pub async fn register_segment(
        &self,
        stream_id: &StreamId,
        rendition_id: &RenditionId,
        announced: NewSegment,
    ) -> Result<(), RegistryError> {
        let mut store = self.store.write().await;

        match store.get_mut(stream_id) {
            Some(stream) => {
                if stream.ended {
                    return Err(RegistryError::StreamEnded);
                }

                let rendition = stream
                    .renditions
                    .entry(rendition_id.clone())
                    .or_insert_with(|| RenditionState::new(rendition_id.clone()));
                if rendition.ended {
                    return Err(RegistryError::RenditionEnded);
                }

                let sequence = announced.sequence;
                rendition
                    .segments
                    .entry(sequence)
                    .or_insert_with(|| announced.into_segment(Utc::now()));
                Ok(())
            }
            None => {
                // First segment for this stream: materialize the stream and
                // rendition together under the same exclusive lock.
                let sequence = announced.sequence;
                let mut rendition = RenditionState::new(rendition_id.clone());
                rendition
                    .segments
                    .insert(sequence, announced.into_segment(Utc::now()));

                let mut stream = StreamState::new(stream_id.clone());
                stream.renditions.insert(rendition_id.clone(), rendition);
                store.set(stream);

                debug!(
                    target: "hls.repository.streams",
                    stream = %stream_id,
                    rendition = %rendition_id,
                    sequence,
                    "Stream materialized on first segment"
                );
                Ok(())
            }
        }
    }

    /// Returns an ordered, detached view of one rendition, or `None` if the
    /// stream or rendition is unknown.
    pub async fn rendition_snapshot(
        &self,
        stream_id: &StreamId,
        rendition_id: &RenditionId,
    ) -> Option<RenditionSnapshot> {
        let store = self.store.read().await;
        let rendition = store.get(stream_id)?.renditions.get(rendition_id)?;

        let mut segments: Vec<Segment> = rendition.segments.values().cloned().collect();
        segments.sort_unstable_by_key(|segment| segment.sequence);

        Some(RenditionSnapshot {
            segments,
            ended: rendition.ended,
        })
    }

    /// Marks a stream and every rendition it contains as ended.
    ///
    /// Unknown and already-ended streams are no-ops: end signals may race
    /// with upstream restarts and must stay idempotent.
    pub async fn end_stream(&self, stream_id: &StreamId) {
        let mut store = self.store.write().await;

        let Some(stream) = store.get_mut(stream_id) else {
            debug!(
                target: "hls.repository.streams",
                stream = %stream_id,
                "End requested for unknown stream"
            );
            return;
        };
        if stream.ended {
            return;
        }

        stream.ended = true;
        for rendition in stream.renditions.values_mut() {
            rendition.ended = true;
        }

        info!(target: "hls.repository.streams", stream = %stream_id, "Stream ended");
    }

    /// Number of known streams that have not ended.
    pub async fn active_stream_count(&self) -> usize {
        let store = self.store.read().await;
        store
            .stream_ids()
            .iter()
            .filter(|id| store.get(id).is_some_and(|stream| !stream.ended))
            .count()
    }
}

impl Default for StreamRepository {
    fn default() -> Self {
        Self::new()
    }
}
