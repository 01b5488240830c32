//! HLS orchestrator data model.
//!
//! Stream, rendition, and segment types shared by the repository, service,
//! and handler layers. Streams partition the registry; within a stream,
//! renditions own their segments keyed by sequence number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque identifier for one live stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamId(String);

impl StreamId {
    /// Creates a stream id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StreamId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for StreamId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Opaque identifier for one encoding variant (quality tier) of a stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenditionId(String);

impl RenditionId {
    /// Creates a rendition id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RenditionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RenditionId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// A segment announcement, as received from the packager.
///
/// This is the JSON body of a registration request. `duration` is in
/// seconds; `path` is an opaque locator the orchestrator never reads
/// as media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSegment {
    /// Ordering and identity key within the rendition.
    pub sequence: i64,

    /// Segment duration in seconds.
    pub duration: f64,

    /// Opaque locator for the media bytes.
    pub path: String,
}

impl NewSegment {
    /// Converts the announcement into a stored [`Segment`], stamping the
    /// acceptance time.
    pub fn into_segment(self, received_at: DateTime<Utc>) -> Segment {
        Segment {
            sequence: self.sequence,
            duration: self.duration,
            path: self.path,
            received_at,
        }
    }
}

/// A registered media segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Ordering and identity key within the rendition.
    pub sequence: i64,

    /// Segment duration in seconds.
    pub duration: f64,

    /// Opaque locator for the media bytes.
    pub path: String,

    /// When the registry accepted the segment. Registry metadata only,
    /// not part of the caller-visible contract.
    pub received_at: DateTime<Utc>,
}

/// State of one rendition within a stream.
#[derive(Debug, Clone)]
pub struct RenditionState {
    /// Rendition identifier within the parent stream.
    pub id: RenditionId,

    /// Registered segments keyed by sequence number.
    pub segments: HashMap<i64, Segment>,

    /// Whether the rendition has ended. Monotonic: never reverts to false.
    pub ended: bool,
}

impl RenditionState {
    /// Creates an empty, live rendition.
    pub fn new(id: RenditionId) -> Self {
        Self {
            id,
            segments: HashMap::new(),
            ended: false,
        }
    }
}

/// State of one live stream and all of its renditions.
///
/// The top-level unit of storage. Renditions are owned exclusively by
/// their stream and materialize lazily on first segment registration.
#[derive(Debug, Clone)]
pub struct StreamState {
    /// Stream identifier.
    pub id: StreamId,

    /// Renditions keyed by rendition id.
    pub renditions: HashMap<RenditionId, RenditionState>,

    /// Whether the stream has ended. Monotonic; true implies every
    /// contained rendition has ended as well.
    pub ended: bool,
}

impl StreamState {
    /// Creates an empty, live stream.
    pub fn new(id: StreamId) -> Self {
        Self {
            id,
            renditions: HashMap::new(),
            ended: false,
        }
    }
}

/// Point-in-time view of one rendition, detached from the registry.
///
/// The segment list is a defensive copy; mutating it cannot corrupt
/// registry state.
#[derive(Debug, Clone)]
pub struct RenditionSnapshot {
    /// Segments sorted ascending by sequence.
    pub segments: Vec<Segment>,

    /// Whether the rendition had ended at snapshot time.
    pub ended: bool,
}
