//! Position coercion.
//!
//! Maps an arbitrary requested position onto one the coordinator can actually
//! play: inside a segment, or exactly at 0 or the source duration.

use std::time::Duration;

use super::segment::PlayableSegments;
use crate::time::ensure_in_range;

/// Direction hint used when a requested position lands in a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekDirection {
    Forward,
    Backward,
}

impl SeekDirection {
    pub fn from_forward(forward: bool) -> Self {
        if forward {
            SeekDirection::Forward
        } else {
            SeekDirection::Backward
        }
    }
}

/// Bounds applied before snapping: the optional position range and the duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionBounds {
    pub min: Option<Duration>,
    pub max: Option<Duration>,
    pub duration: Duration,
}

impl PositionBounds {
    pub fn new(duration: Duration) -> Self {
        Self {
            min: None,
            max: None,
            duration,
        }
    }

    pub fn lower(&self) -> Duration {
        self.min.unwrap_or(Duration::ZERO)
    }

    pub fn upper(&self) -> Duration {
        self.max.unwrap_or(self.duration)
    }
}

/// Coerce `requested` to a playable position.
///
/// # Arguments
/// * `requested` - Position asked for by the caller
/// * `segments` - Gap-free segments of the current source
/// * `bounds` - Position range and duration
/// * `direction` - Which way to snap when the position falls in a gap
///
/// # Returns
/// A position inside some segment, or exactly `0` or `bounds.duration`.
pub fn coerce_position(
    requested: Duration,
    segments: &PlayableSegments,
    bounds: PositionBounds,
    direction: SeekDirection,
) -> Duration {
    let position = ensure_in_range(requested, bounds.lower(), bounds.upper());

    if segments.find(position).is_some() {
        return position;
    }

    match direction {
        SeekDirection::Forward => match segments.first_starting_at_or_after(position) {
            Some(segment) => segment.offset(),
            None if !segments.is_empty() => bounds.duration,
            None => Duration::ZERO,
        },
        SeekDirection::Backward => segments
            .last_starting_before(position)
            .map(|segment| segment.end())
            .unwrap_or(Duration::ZERO),
    }
}
