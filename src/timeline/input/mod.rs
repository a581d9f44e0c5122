//! Input handling for the timeline.
//!
//! This module turns pointer, button and resize input into timeline
//! operations.

mod buttons;
mod mouse;

pub use buttons::{handle_button, ButtonPhase, TransportButton};
pub use mouse::{handle_pointer_event, PointerArea, PointerEvent, PointerGesture, PointerState};

use crate::markers::MediaMarker;
use crate::media::PlayerFactory;
use crate::timeline::control::TimelineControl;

/// Any input the timeline reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineInput {
    Pointer(PointerEvent),
    Button {
        button: TransportButton,
        phase: ButtonPhase,
        shift: bool,
    },
    Resize {
        width: f64,
        height: f64,
    },
}

/// Handle any input, dispatching to the appropriate handler.
///
/// # Arguments
/// * `control` - The timeline
/// * `input` - The input to handle
/// * `markers` - Host markers, for skipping and re-layout
pub fn handle_input<F: PlayerFactory>(
    control: &mut TimelineControl<F>,
    input: TimelineInput,
    markers: &[MediaMarker],
) {
    match input {
        TimelineInput::Pointer(event) => control.pointer_event(event),
        TimelineInput::Button {
            button,
            phase,
            shift,
        } => handle_button(control, button, phase, shift, markers),
        TimelineInput::Resize { width, height } => control.resize(width, height, markers),
    }
}
