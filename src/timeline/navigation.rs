//! Marker navigation on the timeline.
//!
//! Only visible markers take part. Markers sharing a start time resolve the
//! way a stable sort by start time would: the last of them when skipping
//! back, the first when skipping forward.

use std::time::Duration;

use uuid::Uuid;

use crate::markers::MediaMarker;

/// Closest visible marker starting strictly before `position`.
///
/// # Arguments
/// * `markers` - Host markers, in any order
/// * `position` - Current playback position
///
/// # Returns
/// The marker to skip back to, or `None` if there is none
pub fn previous_marker(markers: &[MediaMarker], position: Duration) -> Option<&MediaMarker> {
    markers
        .iter()
        .filter(|m| m.is_visible() && m.start_time() < position)
        .max_by_key(|m| m.start_time())
}

/// Closest visible marker starting strictly after `position`.
pub fn next_marker(markers: &[MediaMarker], position: Duration) -> Option<&MediaMarker> {
    markers
        .iter()
        .filter(|m| m.is_visible() && m.start_time() > position)
        .min_by_key(|m| m.start_time())
}

/// First visible marker starting exactly at `position`.
pub fn marker_at(markers: &[MediaMarker], position: Duration) -> Option<&MediaMarker> {
    markers
        .iter()
        .find(|m| m.is_visible() && m.start_time() == position)
}

pub fn find_marker(markers: &[MediaMarker], id: Uuid) -> Option<&MediaMarker> {
    markers.iter().find(|m| m.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn markers() -> Vec<MediaMarker> {
        vec![
            MediaMarker::point(secs(8), "late"),
            MediaMarker::point(secs(2), "early"),
            MediaMarker::range(secs(5), secs(1), "middle"),
        ]
    }

    #[test]
    fn empty_markers_navigate_nowhere() {
        assert!(previous_marker(&[], secs(3)).is_none());
        assert!(next_marker(&[], secs(3)).is_none());
    }

    #[test]
    fn previous_is_closest_before() {
        let markers = markers();
        assert_eq!(previous_marker(&markers, secs(7)).unwrap().description(), "middle");
        assert_eq!(previous_marker(&markers, secs(5)).unwrap().description(), "early");
        assert!(previous_marker(&markers, secs(2)).is_none());
    }

    #[test]
    fn next_is_closest_after() {
        let markers = markers();
        assert_eq!(next_marker(&markers, secs(0)).unwrap().description(), "early");
        assert_eq!(next_marker(&markers, secs(5)).unwrap().description(), "late");
        assert!(next_marker(&markers, secs(8)).is_none());
    }

    #[test]
    fn hidden_markers_are_skipped() {
        let mut markers = markers();
        markers[2].set_visible(false);
        assert_eq!(previous_marker(&markers, secs(7)).unwrap().description(), "early");
        assert!(marker_at(&markers, secs(5)).is_none());
    }

    #[test]
    fn ties_resolve_like_a_stable_sort() {
        let markers = vec![
            MediaMarker::point(secs(3), "first"),
            MediaMarker::point(secs(3), "second"),
        ];
        assert_eq!(previous_marker(&markers, secs(4)).unwrap().description(), "second");
        assert_eq!(next_marker(&markers, secs(1)).unwrap().description(), "first");
        assert_eq!(marker_at(&markers, secs(3)).unwrap().description(), "first");
    }

    #[test]
    fn find_by_id() {
        let markers = markers();
        let id = markers[1].id();
        assert_eq!(find_marker(&markers, id).unwrap().description(), "early");
        assert!(find_marker(&markers, Uuid::new_v4()).is_none());
    }
}
