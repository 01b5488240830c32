//! HLS media playlist rendering.
//!
//! Pure formatting: the renderer knows nothing about streams, renditions,
//! or windowing. It emits exactly the segments it is given, which must
//! already be sorted ascending by sequence and free of gaps.

use crate::models::Segment;

/// Renders an HLS media playlist for the given segments.
///
/// `#EXT-X-ENDLIST` is appended iff `ended` is true. An empty segment list
/// still yields a structurally valid playlist with media sequence 0.
pub fn render_media_playlist(segments: &[Segment], ended: bool) -> String {
    let mut playlist = String::new();
    playlist.push_str("#EXTM3U\n");
    playlist.push_str("#EXT-X-VERSION:3\n");

    if segments.is_empty() {
        playlist.push_str("#EXT-X-TARGETDURATION:1\n");
        playlist.push_str("#EXT-X-MEDIA-SEQUENCE:0\n");
        if ended {
            playlist.push_str("#EXT-X-ENDLIST\n");
        }
        return playlist;
    }

    let target = target_duration(segments);
    let media_sequence = segments.first().map_or(0, |segment| segment.sequence);
    playlist.push_str(&format!("#EXT-X-TARGETDURATION:{target}\n"));
    playlist.push_str(&format!("#EXT-X-MEDIA-SEQUENCE:{media_sequence}\n\n"));

    for segment in segments {
        playlist.push_str(&format!("#EXTINF:{:.1},\n", segment.duration));
        playlist.push_str(&segment.path);
        playlist.push('\n');
    }

    if ended {
        playlist.push_str("#EXT-X-ENDLIST\n");
    }

    playlist
}

/// Ceiling of the longest segment duration, with a floor of 1 second.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn target_duration(segments: &[Segment]) -> u64 {
    let longest = segments
        .iter()
        .map(|segment| segment.duration)
        .fold(0.0_f64, f64::max);
    if longest <= 0.0 {
        return 1;
    }
    longest.ceil() as u64
}
