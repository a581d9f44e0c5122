//! Pointer input handling for the timeline.
//!
//! Turns raw press/move/release events into gestures: click-to-seek and
//! drag-to-select on the timescale, and click-to-add-marker over the
//! selection or the progress line.

/// Part of the control under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerArea {
    /// The time ruler; pressing here captures the pointer.
    Timescale,
    /// The waveform/marker area with the selection and the progress line.
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed { x: f64, area: PointerArea },
    Moved { x: f64, area: PointerArea },
    Released { x: f64, area: PointerArea },
}

impl PointerEvent {
    pub fn x(&self) -> f64 {
        match *self {
            PointerEvent::Pressed { x, .. }
            | PointerEvent::Moved { x, .. }
            | PointerEvent::Released { x, .. } => x,
        }
    }

    pub fn area(&self) -> PointerArea {
        match *self {
            PointerEvent::Pressed { area, .. }
            | PointerEvent::Moved { area, .. }
            | PointerEvent::Released { area, .. } => area,
        }
    }
}

/// Pointer capture and hover state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerState {
    captured: bool,
    down_x: f64,
    /// The next release adds a marker (the host shows an add cursor).
    add_marker_armed: bool,
}

impl PointerState {
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn is_add_marker_armed(&self) -> bool {
        self.add_marker_armed
    }
}

/// What a pointer event means for the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerGesture {
    /// Pressed on the timescale; the pointer is captured.
    Captured,
    /// Pressed elsewhere.
    Pressed,
    /// Dragging a selection over `[from, to]` pixels.
    Selecting { from: f64, to: f64 },
    SelectionFinished,
    /// Released without dragging at `x`.
    Clicked(f64),
    AddMarker,
    None,
}

/// Handle a pointer event.
///
/// # Arguments
/// * `event` - The pointer event
/// * `pointer` - Capture and hover state, updated in place
/// * `tolerance` - Pixels the pointer may move before a click becomes a drag
/// * `changing_selection` - A selection drag is already in progress
/// * `add_marker_hot` - The pointer is over a spot where a release adds a marker
///
/// # Returns
/// The recognized gesture
pub fn handle_pointer_event(
    event: PointerEvent,
    pointer: &mut PointerState,
    tolerance: f64,
    changing_selection: bool,
    add_marker_hot: bool,
) -> PointerGesture {
    match event {
        PointerEvent::Pressed { x, area } => {
            if area == PointerArea::Timescale {
                pointer.captured = true;
                pointer.down_x = x;
                PointerGesture::Captured
            } else {
                PointerGesture::Pressed
            }
        }
        PointerEvent::Moved { x, .. } => {
            if pointer.captured {
                if changing_selection || (pointer.down_x - x).abs() > tolerance {
                    PointerGesture::Selecting {
                        from: pointer.down_x.min(x),
                        to: pointer.down_x.max(x),
                    }
                } else {
                    PointerGesture::None
                }
            } else {
                pointer.add_marker_armed = add_marker_hot;
                PointerGesture::None
            }
        }
        PointerEvent::Released { x, .. } => {
            if pointer.captured {
                pointer.captured = false;
                if changing_selection {
                    PointerGesture::SelectionFinished
                } else {
                    PointerGesture::Clicked(x)
                }
            } else if pointer.add_marker_armed {
                pointer.add_marker_armed = false;
                PointerGesture::AddMarker
            } else {
                PointerGesture::None
            }
        }
    }
}
