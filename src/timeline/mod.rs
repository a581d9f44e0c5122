//! The media timeline.
//!
//! A [`TimelineControl`] drives a playback element from pointer and button
//! input and shows the host's markers on a slider.

pub mod control;
pub mod input;
pub mod mapping;
pub mod navigation;
pub mod state;

pub use control::{snap_selection, ControlEvent, MarkerChange, TimelineControl, TimelineSettings};
pub use input::{handle_input, ButtonPhase, PointerArea, PointerEvent, TimelineInput, TransportButton};
pub use mapping::{pixel_to_time, time_to_pixel, GuideKind, GuideLine};
pub use navigation::{find_marker, marker_at, next_marker, previous_marker};
pub use state::{Selection, SelectionHandle, TimelineState, TimerMode};
