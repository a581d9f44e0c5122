//! Transport button handling for the timeline.
//!
//! Maps presses and releases of the transport buttons to control
//! operations. Fast-forward and rewind act for as long as they are held.

use crate::markers::MediaMarker;
use crate::media::{PlayerFactory, SeekDirection};
use crate::timeline::control::TimelineControl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportButton {
    PlayPause,
    SkipPrevious,
    SkipNext,
    FastForward,
    Rewind,
    AddMarker,
    Repeat,
    /// The timer text; clicking it cycles what it shows.
    TimerMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPhase {
    Pressed,
    Released,
}

/// Handle a transport button.
///
/// Buttons act on press, except fast-forward and rewind which also stop on
/// release.
///
/// # Arguments
/// * `control` - The timeline
/// * `button` - Which button
/// * `phase` - Press or release
/// * `shift` - Shift is held; skip-previous goes to the start
/// * `markers` - Host markers, for skipping
pub fn handle_button<F: PlayerFactory>(
    control: &mut TimelineControl<F>,
    button: TransportButton,
    phase: ButtonPhase,
    shift: bool,
    markers: &[MediaMarker],
) {
    match (button, phase) {
        // === Held buttons ===
        (TransportButton::FastForward, ButtonPhase::Pressed) => {
            control.fast_seek_pressed(SeekDirection::Forward)
        }
        (TransportButton::Rewind, ButtonPhase::Pressed) => {
            control.fast_seek_pressed(SeekDirection::Backward)
        }
        (TransportButton::FastForward | TransportButton::Rewind, ButtonPhase::Released) => {
            control.fast_seek_released()
        }

        // === Clicks ===
        (_, ButtonPhase::Released) => {}
        (TransportButton::PlayPause, _) => control.toggle_play_pause(),
        (TransportButton::SkipPrevious, _) => control.skip_previous(shift, markers),
        (TransportButton::SkipNext, _) => control.skip_next(markers),
        (TransportButton::AddMarker, _) => control.add_marker(),
        (TransportButton::Repeat, _) => {
            let enabled = !control.element().repeat_enabled();
            control.set_repeat_enabled(enabled);
        }
        (TransportButton::TimerMode, _) => control.toggle_timer_mode(),
    }
}
