//! Orchestration service binding the windowing policy to the registry.

use std::sync::Arc;

use crate::errors::RegistryError;
use crate::models::{NewSegment, RenditionId, StreamId};
use crate::repositories::StreamRepository;
use crate::services::m3u8::render_media_playlist;
use crate::services::sliding_window::visible_window;

/// Window size used when the configured value is unusable.
pub const DEFAULT_WINDOW_SIZE: usize = 6;

/// Composes the segment registry, window selector, and playlist renderer
/// into the operations the transport layer exposes.
///
/// Carries no state of its own beyond the window size; all stream state
/// lives in the repository.
pub struct PlaylistService {
    repository: Arc<StreamRepository>,
    window_size: usize,
}

impl PlaylistService {
    /// Creates a service exposing at most `window_size` segments per
    /// playlist. Zero is treated as unset and falls back to
    /// [`DEFAULT_WINDOW_SIZE`].
    pub fn new(repository: Arc<StreamRepository>, window_size: usize) -> Self {
        let window_size = if window_size == 0 {
            DEFAULT_WINDOW_SIZE
        } else {
            window_size
        };
        Self {
            repository,
            window_size,
        }
    }

    /// Window size in effect after default substitution.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Records a segment announcement. Duplicate sequences succeed as
    /// no-ops; only an ended stream or rendition rejects.
    pub async fn register_segment(
        &self,
        stream_id: &StreamId,
        rendition_id: &RenditionId,
        segment: NewSegment,
    ) -> Result<(), RegistryError> {
        self.repository
            .register_segment(stream_id, rendition_id, segment)
            .await
    }

    /// Renders the playlist for one rendition: a gap-free window of at most
    /// `window_size` recent segments, carrying the end marker once the
    /// stream has ended. `None` if the stream or rendition is unknown.
    pub async fn playlist(
        &self,
        stream_id: &StreamId,
        rendition_id: &RenditionId,
    ) -> Option<String> {
        let snapshot = self
            .repository
            .rendition_snapshot(stream_id, rendition_id)
            .await?;
        let window = visible_window(&snapshot.segments, self.window_size);
        Some(render_media_playlist(window, snapshot.ended))
    }

    /// Ends a stream. Idempotent; unknown streams are a no-op.
    pub async fn end_stream(&self, stream_id: &StreamId) {
        self.repository.end_stream(stream_id).await;
    }

    /// Number of known streams that have not ended.
    pub async fn active_stream_count(&self) -> usize {
        self.repository.active_stream_count().await
    }
}
