//! Contiguous sliding-window selection over a rendition's segments.

use crate::models::Segment;

/// Selects the segments a player may see: at most `window_size` of the most
/// recent segments, truncated at the first sequence gap.
///
/// Slide first, then filter. Taking the last `window_size` segments keeps the
/// window at the live edge; keeping only the contiguous prefix of that
/// candidate guarantees the result has no hole, which most players treat as a
/// fatal stream error. A missing segment therefore freezes the window at the
/// last good point, and the window grows again as soon as the missing
/// sequence is registered.
///
/// `segments` must be sorted ascending by sequence. A `window_size` of zero
/// selects nothing.
pub fn visible_window(segments: &[Segment], window_size: usize) -> &[Segment] {
    if window_size == 0 || segments.is_empty() {
        return &[];
    }

    let start = segments.len().saturating_sub(window_size);
    let candidate = segments.get(start..).unwrap_or_default();

    let mut visible = 0;
    let mut previous: Option<i64> = None;
    for segment in candidate {
        if let Some(previous) = previous {
            if segment.sequence != previous + 1 {
                break;
            }
        }
        previous = Some(segment.sequence);
        visible += 1;
    }

    candidate.get(..visible).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn segments(sequences: &[i64]) -> Vec<Segment> {
        sequences
            .iter()
            .map(|&sequence| Segment {
                sequence,
                duration: 2.0,
                path: format!("/segments/{sequence}.ts"),
                received_at: Utc::now(),
            })
            .collect()
    }

    fn sequences(window: &[Segment]) -> Vec<i64> {
        window.iter().map(|segment| segment.sequence).collect()
    }

    #[test]
    fn empty_input_selects_nothing() {
        assert!(visible_window(&[], 6).is_empty());
    }

    #[test]
    fn zero_window_selects_nothing() {
        let all = segments(&[1, 2, 3]);
        assert!(visible_window(&all, 0).is_empty());
    }

    #[test]
    fn fewer_segments_than_window_selects_all() {
        let all = segments(&[1, 2, 3]);
        assert_eq!(sequences(visible_window(&all, 6)), vec![1, 2, 3]);
    }

    #[test]
    fn window_slides_to_the_most_recent_segments() {
        let all = segments(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(sequences(visible_window(&all, 3)), vec![4, 5, 6]);
    }

    #[test]
    fn gap_inside_window_truncates_at_last_contiguous_segment() {
        let all = segments(&[1, 2, 4, 5]);
        assert_eq!(sequences(visible_window(&all, 6)), vec![1, 2]);
    }

    #[test]
    fn window_heals_once_the_missing_sequence_arrives() {
        let all = segments(&[1, 2, 3, 4, 5]);
        assert_eq!(sequences(visible_window(&all, 6)), vec![1, 2, 3, 4, 5]);

        let full = segments(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(sequences(visible_window(&full, 6)), vec![2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn gap_older_than_the_window_falls_off_the_back() {
        // The gap at 3 is behind the candidate window, so it cannot
        // truncate anything: the window anchors to the live edge, not to
        // the start of known history.
        let all = segments(&[1, 2, 4, 5, 6]);
        assert_eq!(sequences(visible_window(&all, 3)), vec![4, 5, 6]);
    }

    #[test]
    fn single_segment_is_visible() {
        let all = segments(&[42]);
        assert_eq!(sequences(visible_window(&all, 6)), vec![42]);
    }

    #[test]
    fn adjacent_visible_sequences_always_differ_by_one() {
        let cases: Vec<(Vec<i64>, usize)> = vec![
            (vec![1, 2, 3, 4, 5, 6, 7], 6),
            (vec![1, 2, 4, 5], 6),
            (vec![1, 2, 4, 5, 6], 3),
            (vec![10, 12, 14], 6),
            (vec![-2, -1, 0, 1], 3),
        ];

        for (input, window_size) in cases {
            let all = segments(&input);
            let window = visible_window(&all, window_size);
            assert!(window.len() <= window_size);
            for pair in window.windows(2) {
                let (earlier, later) = (pair.first().unwrap(), pair.last().unwrap());
                assert_eq!(
                    later.sequence,
                    earlier.sequence + 1,
                    "gap in visible window for input {input:?}"
                );
            }
        }
    }
}
