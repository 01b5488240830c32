//! Stream handlers for the HLS orchestrator.
//!
//! Implements the stream endpoints:
//!
//! - `POST /streams/{stream_id}/renditions/{rendition}/segments` - Register segment
//! - `GET /streams/{stream_id}/renditions/{rendition}/playlist.m3u8` - Serve playlist
//! - `POST /streams/{stream_id}/end` - End stream
//!
//! Handlers translate registry outcomes into HTTP statuses and leave all
//! windowing and formatting decisions to the service layer.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::errors::ApiError;
use crate::models::{NewSegment, RenditionId, StreamId};
use crate::observability::metrics;
use crate::routes::AppState;

/// Content type for HLS media playlists.
const PLAYLIST_CONTENT_TYPE: &str = "application/vnd.apple.mpegurl";

/// Handler for POST /streams/{stream_id}/renditions/{rendition}/segments
///
/// Registers one segment announcement for a rendition. The body is
/// `{"sequence": <integer>, "duration": <seconds>, "path": <string>}`.
///
/// # Response
///
/// - 201 Created: segment stored, or already known (duplicates are no-ops)
/// - 400 Bad Request: malformed body
/// - 409 Conflict: stream or rendition has ended
#[instrument(
    skip_all,
    name = "hls.segment.register",
    fields(
        method = "POST",
        endpoint = "/streams/{stream_id}/renditions/{rendition}/segments",
    )
)]
pub async fn register_segment(
    State(state): State<Arc<AppState>>,
    Path((stream_id, rendition_id)): Path<(String, String)>,
    body: axum::body::Bytes,
) -> Result<StatusCode, ApiError> {
    let stream_id = StreamId::from(stream_id);
    let rendition_id = RenditionId::from(rendition_id);

    // Deserialize the body manually to return 400 (not Axum's default 422)
    let announced: NewSegment = serde_json::from_slice(&body).map_err(|e| {
        debug!(target: "hls.handlers.streams", error = %e, "Invalid segment body");
        ApiError::BadRequest("Invalid segment body".to_string())
    })?;

    let sequence = announced.sequence;
    state
        .service
        .register_segment(&stream_id, &rendition_id, announced)
        .await
        .map_err(|e| {
            info!(
                target: "hls.handlers.streams",
                stream = %stream_id,
                rendition = %rendition_id,
                sequence,
                error = %e,
                "Segment rejected"
            );
            ApiError::from(e)
        })?;

    metrics::record_segment_registered();
    debug!(
        target: "hls.handlers.streams",
        stream = %stream_id,
        rendition = %rendition_id,
        sequence,
        "Segment registered"
    );

    Ok(StatusCode::CREATED)
}

/// Handler for GET /streams/{stream_id}/renditions/{rendition}/playlist.m3u8
///
/// Serves the sliding-window media playlist for one rendition.
///
/// # Response
///
/// - 200 OK: playlist text with the HLS content type
/// - 404 Not Found: unknown stream or rendition
#[instrument(
    skip_all,
    name = "hls.playlist.get",
    fields(
        method = "GET",
        endpoint = "/streams/{stream_id}/renditions/{rendition}/playlist.m3u8",
    )
)]
pub async fn get_playlist(
    State(state): State<Arc<AppState>>,
    Path((stream_id, rendition_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let stream_id = StreamId::from(stream_id);
    let rendition_id = RenditionId::from(rendition_id);

    let playlist = state
        .service
        .playlist(&stream_id, &rendition_id)
        .await
        .ok_or_else(|| {
            debug!(
                target: "hls.handlers.streams",
                stream = %stream_id,
                rendition = %rendition_id,
                "Playlist requested for unknown stream or rendition"
            );
            ApiError::NotFound("Unknown stream or rendition".to_string())
        })?;

    Ok(([(header::CONTENT_TYPE, PLAYLIST_CONTENT_TYPE)], playlist).into_response())
}

/// Handler for POST /streams/{stream_id}/end
///
/// Marks a stream and all of its renditions as ended.
///
/// # Response
///
/// - 200 OK: always; unknown streams and repeated calls are no-ops
#[instrument(
    skip_all,
    name = "hls.stream.end",
    fields(method = "POST", endpoint = "/streams/{stream_id}/end")
)]
pub async fn end_stream(
    State(state): State<Arc<AppState>>,
    Path(stream_id): Path<String>,
) -> StatusCode {
    let stream_id = StreamId::from(stream_id);

    state.service.end_stream(&stream_id).await;

    metrics::record_stream_ended();
    info!(target: "hls.handlers.streams", stream = %stream_id, "End stream requested");

    StatusCode::OK
}
