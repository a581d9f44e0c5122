//! Notifications raised by the marker slider and requests for the host.
//!
//! Pixel values are in the slider's coordinate space; the timeline converts
//! them to media time before anything reaches the host.

use std::time::Duration;

use uuid::Uuid;

/// A change the host is asked to apply to its marker collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modification {
    pub id: Uuid,
    pub description: String,
    /// True when the marker should be deleted.
    pub delete: bool,
    pub start_time: Option<Duration>,
    pub length: Option<Duration>,
}

impl Modification {
    /// New description for a marker.
    pub fn describe(id: Uuid, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            delete: false,
            start_time: None,
            length: None,
        }
    }

    /// New timing for a marker, keeping its description.
    pub fn retime(
        id: Uuid,
        description: impl Into<String>,
        start_time: Duration,
        length: Option<Duration>,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            delete: false,
            start_time: Some(start_time),
            length,
        }
    }

    pub fn delete(id: Uuid) -> Self {
        Self {
            id,
            description: String::new(),
            delete: true,
            start_time: None,
            length: None,
        }
    }
}

/// Request to add a marker. A `duration` makes it a range marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddRequest {
    pub start_time: Duration,
    pub duration: Option<Duration>,
}

/// Drag handle of a range marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grip {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SliderEvent {
    /// A visual was pressed and selected.
    Selected(Uuid),
    /// A point marker started moving.
    DragStarted(Uuid),
    /// A point marker moved by `delta` pixels.
    PositionChanged { id: Uuid, delta: f64 },
    /// A point marker was released at `position`.
    DragEnded { id: Uuid, position: f64 },
    Modified(Modification),
    EditorCancelled(Uuid),
    /// A range marker changed while dragging.
    RangeSelectionChanged { id: Uuid, start: f64, end: f64 },
    /// A range marker drag finished.
    RangeSelectionCompleted { id: Uuid, start: f64, end: f64 },
}
