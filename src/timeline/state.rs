//! Timeline state
//!
//! Contains the `TimelineState` struct holding everything the control tracks
//! besides the coordinator and the slider, as well as shared types used across
//! timeline modules.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::input::PointerState;
use crate::media::SeekDirection;
use crate::time::{format_timestamp, in_range};

/// What the timer text shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerMode {
    Elapsed,
    #[default]
    ElapsedWithDuration,
    Remaining,
}

impl TimerMode {
    /// The mode shown after a click on the timer.
    pub fn next(self) -> Self {
        match self {
            TimerMode::Elapsed => TimerMode::ElapsedWithDuration,
            TimerMode::ElapsedWithDuration => TimerMode::Remaining,
            TimerMode::Remaining => TimerMode::Elapsed,
        }
    }

    /// Render the timer. Hours are shown only for media of an hour or more.
    pub fn format(self, position: Duration, duration: Duration) -> String {
        let show_hours = duration >= Duration::from_secs(3600);
        match self {
            TimerMode::Elapsed => format_timestamp(position, show_hours),
            TimerMode::ElapsedWithDuration => format!(
                "{}/{}",
                format_timestamp(position, show_hours),
                format_timestamp(duration, show_hours)
            ),
            TimerMode::Remaining => format_timestamp(duration.saturating_sub(position), show_hours),
        }
    }
}

/// A selected stretch of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: Duration,
    pub end: Duration,
}

impl Selection {
    pub fn new(start: Duration, end: Duration) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, position: Duration) -> bool {
        in_range(position, self.start, self.end)
    }

    pub fn length(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }
}

/// Which selection handle is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionHandle {
    Start,
    End,
}

impl SelectionHandle {
    pub fn opposite(self) -> Self {
        match self {
            SelectionHandle::Start => SelectionHandle::End,
            SelectionHandle::End => SelectionHandle::Start,
        }
    }
}

/// Mutable state of a timeline control.
#[derive(Debug, Clone, Default)]
pub struct TimelineState {
    // === Canvas ===
    /// Rendered width of the timescale in pixels
    pub width: f64,
    /// Rendered height of the marker area in pixels
    pub height: f64,

    // === Selection ===
    pub selection: Option<Selection>,
    /// Range marker whose span is the current selection
    pub selected_range_marker: Option<Uuid>,
    /// True while the selection is being dragged; applying it is deferred
    pub changing_selection: bool,

    // === Transport ===
    /// Whether playback was running when an interaction paused it
    pub was_playing: bool,
    pub timer_mode: TimerMode,
    /// Direction of a held fast-forward or rewind button
    pub fast_seek: Option<SeekDirection>,
    /// Quiet time left before a throttled resume fires
    pub resume_countdown: Option<Duration>,

    // === Markers ===
    /// Cleared after a marker is requested until the next interaction
    pub add_marker_enabled: bool,

    // === Pointer ===
    pub pointer: PointerState,
}

impl TimelineState {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            add_marker_enabled: true,
            ..Self::default()
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    /// Clear the selection and the marker it belongs to.
    pub fn clear_selection(&mut self) {
        self.selected_range_marker = None;
        self.selection = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn timer_mode_cycles() {
        let mode = TimerMode::Elapsed;
        assert_eq!(mode.next(), TimerMode::ElapsedWithDuration);
        assert_eq!(mode.next().next(), TimerMode::Remaining);
        assert_eq!(mode.next().next().next(), TimerMode::Elapsed);
    }

    #[test]
    fn timer_text_without_hours() {
        let position = Duration::from_millis(65_250);
        let duration = secs(600);
        assert_eq!(TimerMode::Elapsed.format(position, duration), "01:05.250");
        assert_eq!(
            TimerMode::ElapsedWithDuration.format(position, duration),
            "01:05.250/10:00.000"
        );
        assert_eq!(TimerMode::Remaining.format(position, duration), "08:54.750");
    }

    #[test]
    fn timer_text_with_hours() {
        let duration = secs(2 * 3600);
        assert_eq!(
            TimerMode::ElapsedWithDuration.format(secs(3661), duration),
            "01:01:01.000/02:00:00.000"
        );
    }

    #[test]
    fn remaining_never_underflows() {
        assert_eq!(TimerMode::Remaining.format(secs(20), secs(10)), "00:00.000");
    }

    #[test]
    fn selection_contains_is_inclusive() {
        let selection = Selection::new(secs(2), secs(4));
        assert!(selection.contains(secs(2)));
        assert!(selection.contains(secs(4)));
        assert!(!selection.contains(secs(5)));
        assert_eq!(selection.length(), secs(2));
    }

    #[test]
    fn new_state_allows_adding_markers() {
        let state = TimelineState::new(640.0, 48.0);
        assert!(state.add_marker_enabled);
        assert!(!state.has_selection());
        assert_eq!(state.timer_mode, TimerMode::ElapsedWithDuration);
    }
}
