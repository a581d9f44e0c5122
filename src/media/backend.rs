//! Player backend seam.
//!
//! The coordinator never decodes media itself. It drives one [`MediaPlayer`]
//! per playable segment, created through a [`PlayerFactory`]. Players report
//! asynchronous happenings (opened, failed, ended, buffering) through a
//! [`PlayerEventSink`], which may be used from any thread; the coordinator
//! drains the channel on its own thread before touching state.

use std::sync::mpsc::Sender;
use std::time::Duration;

use super::segment::{MediaSegment, SegmentIndex};

/// One physical player bound to one segment's source.
pub trait MediaPlayer {
    /// Start opening `source`. Completion or failure is reported through `events`.
    fn open(&mut self, source: &str, events: PlayerEventSink);

    /// Release the underlying resource. Pending callbacks may still arrive.
    fn close(&mut self);

    fn play(&mut self);

    fn pause(&mut self);

    /// Current position relative to the start of this player's media.
    fn position(&self) -> Duration;

    fn set_position(&mut self, position: Duration);

    /// Length of the opened media, once known.
    fn natural_duration(&self) -> Option<Duration>;

    fn is_buffering(&self) -> bool;

    /// Buffering progress in `[0, 1]`.
    fn buffering_progress(&self) -> f64;

    /// Download progress in `[0, 1]`. Local media reports 1.
    fn download_progress(&self) -> f64;

    fn set_volume(&mut self, volume: f64);

    fn set_balance(&mut self, balance: f64);

    fn set_muted(&mut self, muted: bool);
}

/// Creates players for the coordinator.
pub trait PlayerFactory {
    type Player: MediaPlayer;

    /// Create an unopened player for the playable segment at `index`.
    fn create(&mut self, index: SegmentIndex, segment: &MediaSegment) -> Self::Player;
}

/// What a player reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEventKind {
    Opened,
    /// Open or playback failure with the platform error code, if any.
    Failed { code: Option<u32>, message: String },
    Ended,
    BufferingStarted,
}

/// A player report tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEvent {
    pub index: SegmentIndex,
    /// Source generation the player was opened for. Reports from a previous
    /// source are discarded.
    pub generation: u64,
    pub kind: PlayerEventKind,
}

/// Sending half handed to a player when it is opened.
#[derive(Debug, Clone)]
pub struct PlayerEventSink {
    index: SegmentIndex,
    generation: u64,
    tx: Sender<PlayerEvent>,
}

impl PlayerEventSink {
    pub(crate) fn new(index: SegmentIndex, generation: u64, tx: Sender<PlayerEvent>) -> Self {
        Self {
            index,
            generation,
            tx,
        }
    }

    pub fn index(&self) -> SegmentIndex {
        self.index
    }

    pub fn opened(&self) {
        self.send(PlayerEventKind::Opened);
    }

    pub fn failed(&self, code: Option<u32>, message: impl Into<String>) {
        self.send(PlayerEventKind::Failed {
            code,
            message: message.into(),
        });
    }

    pub fn ended(&self) {
        self.send(PlayerEventKind::Ended);
    }

    pub fn buffering_started(&self) {
        self.send(PlayerEventKind::BufferingStarted);
    }

    fn send(&self, kind: PlayerEventKind) {
        // Ignore send errors (the coordinator may have been dropped)
        let _ = self.tx.send(PlayerEvent {
            index: self.index,
            generation: self.generation,
            kind,
        });
    }
}
