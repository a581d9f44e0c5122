//! Segmented media playback.
//!
//! A [`MediaSource`] stitches discrete media resources into one virtual
//! timeline; [`PlaybackElement`] plays it through one backend player per
//! segment.

pub mod backend;
pub mod coerce;
pub mod element;
pub mod failure;
pub mod segment;
pub mod sim;
pub mod ticker;

pub use backend::{MediaPlayer, PlayerEvent, PlayerEventKind, PlayerEventSink, PlayerFactory};
pub use coerce::{coerce_position, PositionBounds, SeekDirection};
pub use element::{ElementEvent, PlaybackElement, PlaybackSettings, SeekOrigin};
pub use failure::{FailureCause, MediaError};
pub use segment::{MediaSegment, MediaSource, PlayableSegments, SegmentIndex};
pub use sim::{SimulatedBackend, SimulatedPlayer};
pub use ticker::Ticker;
