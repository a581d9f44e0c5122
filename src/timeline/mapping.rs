//! Conversion between media time and timeline pixels.
//!
//! Both directions clamp to the visible range and degrade to 0 when the
//! duration or the width is zero.

use std::time::Duration;

use crate::markers::{MediaMarker, MultiThumbSlider};
use crate::time::{ensure_in_range, is_zero};

/// Pixel offset of `position` on a timeline `width` pixels wide.
///
/// # Arguments
/// * `position` - Position on the virtual timeline
/// * `duration` - Total media duration
/// * `width` - Rendered width of the timeline
///
/// # Returns
/// A value in `[0, width]`, or 0 for an empty timeline
pub fn time_to_pixel(position: Duration, duration: Duration, width: f64) -> f64 {
    if duration.is_zero() || !width.is_finite() || width <= 0.0 {
        return 0.0;
    }
    let ratio = position.as_secs_f64() / duration.as_secs_f64();
    (ratio * width).clamp(0.0, width)
}

/// Media position under pixel `x`, clamped to `[0, duration]`.
pub fn pixel_to_time(x: f64, duration: Duration, width: f64) -> Duration {
    if is_zero(width) || !width.is_finite() || !x.is_finite() {
        return Duration::ZERO;
    }
    let seconds = (x / width) * duration.as_secs_f64();
    let position = if seconds > 0.0 {
        Duration::try_from_secs_f64(seconds).unwrap_or(duration)
    } else {
        Duration::ZERO
    };
    ensure_in_range(position, Duration::ZERO, duration)
}

/// What a guide line marks, so a renderer can pick its brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideKind {
    /// A system tag, read-only.
    System,
    /// An edge of a range marker.
    RangeEdge,
    Point,
}

/// A dashed vertical line drawn under a marker across the content area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub position: f64,
    pub kind: GuideKind,
}

pub fn guide_kind(marker: &MediaMarker) -> GuideKind {
    if marker.is_system_tag() {
        GuideKind::System
    } else if marker.is_range() {
        GuideKind::RangeEdge
    } else {
        GuideKind::Point
    }
}

/// Guide lines for every visual on the slider, back to front.
///
/// Point markers get one line at their thumb; range markers get one at
/// each edge. Visuals whose marker is missing from `markers` are skipped.
pub fn marker_guide_lines(slider: &MultiThumbSlider, markers: &[MediaMarker]) -> Vec<GuideLine> {
    let find = |id| markers.iter().find(|m| m.id() == id);
    let mut lines = Vec::new();

    for id in slider.order() {
        let Some(marker) = find(id) else {
            continue;
        };
        let kind = guide_kind(marker);
        if let Some(thumb) = slider.thumb(id) {
            let position = if thumb.left().is_nan() { 0.0 } else { thumb.left() };
            lines.push(GuideLine { position, kind });
        } else if let Some(range) = slider.range(id) {
            lines.push(GuideLine {
                position: range.start(),
                kind,
            });
            lines.push(GuideLine {
                position: range.end(),
                kind,
            });
        }
    }

    lines
}
