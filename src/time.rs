//! Time helpers shared by the coordinator and the timeline.
//!
//! Positions are non-negative `Duration`s on the virtual (stitched) timeline.
//! Pixel math is done in `f64` and compared with [`MEDIA_EPSILON`].

use std::time::Duration;

/// The smallest difference recognized when comparing two pixel or media values.
pub const MEDIA_EPSILON: f64 = 0.000001;

/// One tick of the platform media clock (100ns).
pub const TICK: Duration = Duration::from_nanos(100);

/// True if `lhs` is greater than `rhs` by more than [`MEDIA_EPSILON`].
pub fn is_greater_than(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs) > MEDIA_EPSILON
}

/// True if the value is within [`MEDIA_EPSILON`] of zero.
pub fn is_zero(value: f64) -> bool {
    value.abs() < MEDIA_EPSILON
}

/// Inclusive range check: `start <= value <= end`.
pub fn in_range(value: Duration, start: Duration, end: Duration) -> bool {
    value >= start && value <= end
}

/// Clamp `value` into `[start, end]`.
///
/// Unlike `Ord::clamp` this never panics when `start > end`; the lower bound
/// wins in that case.
pub fn ensure_in_range(value: Duration, start: Duration, end: Duration) -> Duration {
    if value < start {
        start
    } else if value > end {
        end
    } else {
        value
    }
}

/// Convert seconds to a `Duration`, mapping negative and non-finite input to
/// zero and saturating at `Duration::MAX`.
pub fn secs_to_duration(seconds: f64) -> Duration {
    if seconds.is_finite() && seconds > 0.0 {
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

/// Convert seconds to a `Duration`, or `None` if the value is negative,
/// not finite, or too large.
pub fn checked_secs_to_duration(seconds: f64) -> Option<Duration> {
    if seconds.is_finite() && seconds >= 0.0 {
        Duration::try_from_secs_f64(seconds).ok()
    } else {
        None
    }
}

/// Format a timestamp as `HH:MM:SS.mmm`, or `MM:SS.mmm` when `show_hours` is false.
///
/// The hours field is the total number of hours, so it may exceed 23.
pub fn format_timestamp(value: Duration, show_hours: bool) -> String {
    let total_ms = value.as_millis();
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let seconds = (total_ms / 1_000) % 60;
    let millis = total_ms % 1_000;

    if show_hours {
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
    }
}
