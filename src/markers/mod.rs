//! Marker model and marker visuals.
//!
//! [`MediaMarker`]s belong to the host. [`MultiThumbSlider`] keeps a visual
//! for each visible marker, in pixel space, and reports drags and edits as
//! [`SliderEvent`]s.

pub mod editor;
pub mod events;
pub mod marker;
pub mod range;
pub mod slider;
pub mod thumb;

pub use editor::EditorState;
pub use events::{AddRequest, Grip, Modification, SliderEvent};
pub use marker::{MarkerProperty, MediaMarker, DEFAULT_POINT_NAME, DEFAULT_RANGE_NAME};
pub use range::{MarkerError, MarkerRange};
pub use slider::MultiThumbSlider;
pub use thumb::MarkerThumb;
