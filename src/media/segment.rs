//! Segment and source model.
//!
//! A [`MediaSource`] is an ordered list of [`MediaSegment`]s laid out on one
//! virtual timeline. Segments without a backing source are gaps: they occupy
//! timeline space but nothing plays there. [`PlayableSegments`] is the sorted,
//! gap-free view that the coordinator indexes its players by.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::time::in_range;

/// A contiguous piece of the virtual timeline, optionally backed by one media resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSegment {
    offset: Duration,
    duration: Duration,
    source: Option<String>,
}

impl MediaSegment {
    /// Create a segment backed by `source` (a URI or opaque handle).
    pub fn new(offset: Duration, duration: Duration, source: impl Into<String>) -> Self {
        Self {
            offset,
            duration,
            source: Some(source.into()),
        }
    }

    /// Create a gap: timeline space with no backing media.
    pub fn gap(offset: Duration, duration: Duration) -> Self {
        Self {
            offset,
            duration,
            source: None,
        }
    }

    pub fn offset(&self) -> Duration {
        self.offset
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Timeline position where this segment ends (`offset + duration`),
    /// saturating at `Duration::MAX`.
    pub fn end(&self) -> Duration {
        self.offset.saturating_add(self.duration)
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_gap(&self) -> bool {
        self.source.is_none()
    }

    /// Inclusive containment: `offset <= position <= offset + duration`.
    pub fn contains(&self, position: Duration) -> bool {
        in_range(position, self.offset, self.end())
    }
}

/// The media handed to the coordinator: segments plus presentation hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    segments: Vec<MediaSegment>,
    has_video: bool,
    duration: Duration,
}

impl MediaSource {
    /// Build a source. Segments are ordered by offset (stable for equal offsets).
    ///
    /// The duration is the furthest end among segments with a backing source;
    /// trailing gaps do not extend it.
    pub fn new(segments: impl IntoIterator<Item = MediaSegment>) -> Self {
        let mut segments: Vec<MediaSegment> = segments.into_iter().collect();
        segments.sort_by_key(|s| s.offset);

        let duration = segments
            .iter()
            .filter(|s| !s.is_gap())
            .map(MediaSegment::end)
            .max()
            .unwrap_or_default();

        Self {
            segments,
            has_video: false,
            duration,
        }
    }

    /// Mark the source as video (previews keep aspect ratio) or audio-only.
    pub fn with_video(mut self, has_video: bool) -> Self {
        self.has_video = has_video;
        self
    }

    pub fn segments(&self) -> &[MediaSegment] {
        &self.segments
    }

    pub fn has_video(&self) -> bool {
        self.has_video
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The gap-free, offset-ordered segments the coordinator plays.
    pub fn playable(&self) -> PlayableSegments {
        PlayableSegments::new(self.segments.iter().filter(|s| !s.is_gap()).cloned())
    }
}

/// Index shared by the playable segment arena and the player arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentIndex(pub usize);

impl fmt::Display for SegmentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Offset-ordered segments that all have a backing source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayableSegments {
    segments: Vec<MediaSegment>,
}

impl PlayableSegments {
    pub fn new(segments: impl IntoIterator<Item = MediaSegment>) -> Self {
        let mut segments: Vec<MediaSegment> =
            segments.into_iter().filter(|s| !s.is_gap()).collect();
        segments.sort_by_key(|s| s.offset);
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: SegmentIndex) -> Option<&MediaSegment> {
        self.segments.get(index.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentIndex, &MediaSegment)> {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, s)| (SegmentIndex(i), s))
    }

    /// The segment after `index`, if any.
    pub fn next(&self, index: SegmentIndex) -> Option<(SegmentIndex, &MediaSegment)> {
        let next = SegmentIndex(index.0 + 1);
        self.get(next).map(|s| (next, s))
    }

    /// Segment containing `position`.
    ///
    /// A segment starting exactly at `position` wins over one ending there, so
    /// a boundary between two adjacent segments resolves to the later one.
    pub fn find(&self, position: Duration) -> Option<(SegmentIndex, &MediaSegment)> {
        self.iter()
            .find(|(_, s)| s.offset == position)
            .or_else(|| self.iter().find(|(_, s)| s.contains(position)))
    }

    /// First segment whose offset is at or after `position`.
    pub fn first_starting_at_or_after(&self, position: Duration) -> Option<&MediaSegment> {
        self.segments.iter().find(|s| s.offset >= position)
    }

    /// First segment whose offset is strictly after `position`.
    pub fn first_starting_after(&self, position: Duration) -> Option<&MediaSegment> {
        self.segments.iter().find(|s| s.offset > position)
    }

    /// Last segment whose offset is strictly before `position`.
    pub fn last_starting_before(&self, position: Duration) -> Option<&MediaSegment> {
        self.segments.iter().rev().find(|s| s.offset < position)
    }

    /// True if any segment contains `position`.
    pub fn covers(&self, position: Duration) -> bool {
        self.segments.iter().any(|s| s.contains(position))
    }

    /// True if any segment starts inside `[start, end]`.
    pub fn any_starting_within(&self, start: Duration, end: Duration) -> bool {
        self.segments.iter().any(|s| in_range(s.offset, start, end))
    }
}
