//! scrubline - segmented media timeline engine
//!
//! Plays recordings stitched together from discrete media segments as one
//! continuous timeline, keeps the position out of gaps, and backs a timeline
//! control with point and range markers. Rendering and decoding are left to
//! the host.

pub mod config;
pub mod markers;
pub mod media;
pub mod project;
pub mod time;
pub mod timeline;

pub use config::Config;
pub use project::Project;
