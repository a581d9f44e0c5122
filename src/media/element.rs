//! Segment-switching playback coordinator.
//!
//! [`PlaybackElement`] presents one continuous position over a [`MediaSource`]
//! while delegating actual playback to one player per playable segment. It
//! decides which player is active, hands off between players at segment
//! boundaries, snaps positions out of gaps, and recovers from transient
//! player failures.
//!
//! The element is single-threaded. Player callbacks arrive over a channel and
//! are applied by [`PlaybackElement::pump`] (also called from
//! [`PlaybackElement::advance`]), which the host drives from its event loop.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use chrono::TimeDelta;
use tracing::{debug, info, trace, warn};

use super::backend::{MediaPlayer, PlayerEvent, PlayerEventKind, PlayerEventSink, PlayerFactory};
use super::coerce::{coerce_position, PositionBounds, SeekDirection};
use super::failure::{FailureCause, MediaError};
use super::segment::{MediaSource, PlayableSegments, SegmentIndex};
use super::ticker::Ticker;
use crate::time::ensure_in_range;

/// Where a seek offset is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOrigin {
    /// Offset is an absolute position.
    BeginTime,
    /// Offset is relative to the current position.
    Duration,
}

/// Tunables for the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSettings {
    pub auto_open_media: bool,
    pub repeat_enabled: bool,
    pub volume: f64,
    pub balance: f64,
    pub muted: bool,
    pub position_tick: Duration,
    pub buffering_tick: Duration,
    pub open_check_tick: Duration,
    /// Player re-seeks smaller than this are skipped.
    pub seek_tolerance: Duration,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            auto_open_media: true,
            repeat_enabled: false,
            volume: 1.0,
            balance: 0.0,
            muted: false,
            position_tick: Duration::from_millis(10),
            buffering_tick: Duration::from_millis(100),
            open_check_tick: Duration::from_millis(100),
            seek_tolerance: Duration::from_millis(50),
        }
    }
}

/// Notifications for the host, drained with [`PlaybackElement::take_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum ElementEvent {
    PositionChanged(Duration),
    PlayingChanged(bool),
    /// The active segment changed (`None` when no player is active).
    SegmentChanged(Option<SegmentIndex>),
    MediaOpened,
    MediaFailed(MediaError),
    BufferingChanged(bool),
    /// Playback reached the end without repeat.
    PlaybackEnded,
}

#[derive(Debug)]
struct PlayerSlot<P> {
    player: P,
    was_opened: bool,
}

/// The coordinator. Generic over the player backend.
pub struct PlaybackElement<F: PlayerFactory> {
    factory: F,
    settings: PlaybackSettings,

    // === Source ===
    source: Option<MediaSource>,
    segments: PlayableSegments,
    /// Parallel to `segments`: `players[i]` plays `segments[i]`.
    players: Vec<PlayerSlot<F::Player>>,
    active: Option<SegmentIndex>,
    generation: u64,

    // === Position ===
    position: Duration,
    min_position: Option<Duration>,
    max_position: Option<Duration>,
    updating_position: bool,

    // === State ===
    is_playing: bool,
    is_media_opening: bool,
    is_media_opened: bool,
    is_media_buffering: bool,
    buffering_progress: f64,
    has_media_content: bool,
    media_error: Option<MediaError>,
    opened_count: usize,

    // === Timers ===
    position_timer: Ticker,
    buffering_timer: Ticker,
    open_check_timer: Ticker,

    // === Channels ===
    event_tx: Sender<PlayerEvent>,
    event_rx: Receiver<PlayerEvent>,
    events: Vec<ElementEvent>,
}

impl<F: PlayerFactory> PlaybackElement<F> {
    pub fn new(factory: F, settings: PlaybackSettings) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            factory,
            position_timer: Ticker::new(settings.position_tick),
            buffering_timer: Ticker::new(settings.buffering_tick),
            open_check_timer: Ticker::new(settings.open_check_tick),
            settings,
            source: None,
            segments: PlayableSegments::default(),
            players: Vec::new(),
            active: None,
            generation: 0,
            position: Duration::ZERO,
            min_position: None,
            max_position: None,
            updating_position: false,
            is_playing: false,
            is_media_opening: false,
            is_media_opened: false,
            is_media_buffering: false,
            buffering_progress: 0.0,
            has_media_content: false,
            media_error: None,
            opened_count: 0,
            event_tx,
            event_rx,
            events: Vec::new(),
        }
    }

    // === Accessors ===

    pub fn source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }

    pub fn segments(&self) -> &PlayableSegments {
        &self.segments
    }

    pub fn duration(&self) -> Duration {
        self.source.as_ref().map_or(Duration::ZERO, MediaSource::duration)
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn min_position(&self) -> Option<Duration> {
        self.min_position
    }

    pub fn max_position(&self) -> Option<Duration> {
        self.max_position
    }

    pub fn active_segment(&self) -> Option<SegmentIndex> {
        self.active
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_media_opening(&self) -> bool {
        self.is_media_opening
    }

    pub fn is_media_opened(&self) -> bool {
        self.is_media_opened
    }

    pub fn is_media_buffering(&self) -> bool {
        self.is_media_buffering
    }

    pub fn buffering_progress(&self) -> f64 {
        self.buffering_progress
    }

    pub fn has_media_content(&self) -> bool {
        self.has_media_content
    }

    /// The last failure surfaced to the host, cleared when the source changes.
    pub fn media_error(&self) -> Option<&MediaError> {
        self.media_error.as_ref()
    }

    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    pub fn repeat_enabled(&self) -> bool {
        self.settings.repeat_enabled
    }

    pub fn player(&self, index: SegmentIndex) -> Option<&F::Player> {
        self.players.get(index.0).map(|slot| &slot.player)
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Drain pending notifications.
    pub fn take_events(&mut self) -> Vec<ElementEvent> {
        std::mem::take(&mut self.events)
    }

    // === Settings ===

    pub fn set_repeat_enabled(&mut self, enabled: bool) {
        self.settings.repeat_enabled = enabled;
    }

    pub fn set_auto_open_media(&mut self, enabled: bool) {
        self.settings.auto_open_media = enabled;
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.settings.volume = volume;
        self.update_player_properties();
    }

    pub fn set_balance(&mut self, balance: f64) {
        self.settings.balance = balance;
        self.update_player_properties();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.update_player_properties();
    }

    fn update_player_properties(&mut self) {
        for slot in &mut self.players {
            slot.player.set_volume(self.settings.volume);
            slot.player.set_balance(self.settings.balance);
            slot.player.set_muted(self.settings.muted);
        }
    }

    // === Source lifecycle ===

    /// Replace the media source, resetting all playback state.
    ///
    /// Players are only created when media is opened (immediately if
    /// `auto_open_media` is set, otherwise on the first [`play`](Self::play)).
    pub fn set_source(&mut self, source: Option<MediaSource>) {
        self.buffering_timer.stop();
        self.open_check_timer.stop();
        self.position_timer.stop();

        self.close_media();
        self.segments = PlayableSegments::default();
        self.generation += 1;

        if self.active.take().is_some() {
            self.events.push(ElementEvent::SegmentChanged(None));
        }
        self.media_error = None;
        self.is_media_opening = false;
        self.is_media_opened = false;
        self.set_buffering(false);
        self.buffering_progress = 0.0;
        self.min_position = None;
        self.max_position = None;
        self.update_position(Duration::ZERO);
        self.has_media_content = false;

        self.source = source;
        let Some(source) = &self.source else {
            info!("media source cleared");
            return;
        };

        self.segments = source.playable();
        self.has_media_content = !self.segments.is_empty();
        info!(
            segments = source.segments().len(),
            playable = self.segments.len(),
            duration_ms = source.duration().as_millis() as u64,
            "media source set"
        );

        self.seek(TimeDelta::zero(), SeekOrigin::BeginTime, true);
        if self.has_media_content && self.settings.auto_open_media {
            self.open_media();
        }
    }

    fn open_media(&mut self) {
        for (index, segment) in self.segments.iter() {
            let mut player = self.factory.create(index, segment);
            if let Some(uri) = segment.source() {
                debug!(%index, uri, "opening player");
                let sink = PlayerEventSink::new(index, self.generation, self.event_tx.clone());
                player.open(uri, sink);
            }
            self.players.push(PlayerSlot {
                player,
                was_opened: false,
            });
        }

        self.update_player_properties();
        self.open_check_timer.start();
        self.is_media_opening = true;
    }

    fn close_media(&mut self) {
        self.opened_count = 0;
        for slot in &mut self.players {
            slot.player.close();
        }
        self.players.clear();
    }

    fn reopen_player(&mut self, index: SegmentIndex) {
        let Some(uri) = self.segments.get(index).and_then(|s| s.source()) else {
            return;
        };
        let uri = uri.to_string();
        let Some(slot) = self.players.get_mut(index.0) else {
            return;
        };

        warn!(%index, uri, "recoverable player failure, reopening");
        slot.player.close();
        slot.was_opened = false;
        self.opened_count = self.opened_count.saturating_sub(1);
        self.position_timer.stop();
        self.is_media_opened = false;
        self.is_media_opening = true;

        self.update_player_properties();

        let sink = PlayerEventSink::new(index, self.generation, self.event_tx.clone());
        if let Some(slot) = self.players.get_mut(index.0) {
            slot.player.open(&uri, sink);
        }
        self.open_check_timer.start();
    }

    fn check_media_opened(&mut self) {
        if self.is_media_opened || self.players.is_empty() {
            return;
        }

        let all_opened = self.opened_count == self.players.len()
            && self
                .players
                .iter()
                .all(|slot| slot.player.download_progress() >= 1.0);
        if !all_opened {
            return;
        }

        self.open_check_timer.stop();
        self.is_media_opening = false;
        self.is_media_opened = true;
        debug!(players = self.players.len(), "media opened");
        self.events.push(ElementEvent::MediaOpened);

        self.apply_position();

        if self.is_playing {
            self.internal_play();
        }
    }

    // === Position ===

    fn bounds(&self) -> PositionBounds {
        PositionBounds {
            min: self.min_position,
            max: self.max_position,
            duration: self.duration(),
        }
    }

    fn coerce(&self, value: Duration, direction: SeekDirection) -> Duration {
        if self.source.is_none() {
            return Duration::ZERO;
        }
        coerce_position(value, &self.segments, self.bounds(), direction)
    }

    /// Set the position. The value is coerced (snapping forward out of gaps)
    /// and applied to the players if it changed.
    pub fn set_position(&mut self, value: Duration) {
        let coerced = self.coerce(value, SeekDirection::Forward);
        if self.update_position(coerced) {
            self.apply_position();
        }
    }

    fn update_position(&mut self, value: Duration) -> bool {
        if value == self.position {
            return false;
        }
        self.position = value;
        self.events.push(ElementEvent::PositionChanged(value));
        true
    }

    /// Seek relative to `origin`.
    ///
    /// Targets at or past the end (or the range maximum) wrap to 0 with repeat
    /// enabled and otherwise stop at the duration. A target that falls in a gap
    /// snaps forward when `force_seek_forward` is set or the seek is a forward
    /// relative one; otherwise it snaps back to the end of the previous segment.
    ///
    /// # Arguments
    /// * `offset` - Signed offset; negative values are only meaningful for relative seeks
    /// * `origin` - Absolute or relative to the current position
    /// * `force_seek_forward` - Always snap forward out of gaps
    pub fn seek(&mut self, offset: TimeDelta, origin: SeekOrigin, force_seek_forward: bool) {
        let base = match origin {
            SeekOrigin::BeginTime => Duration::ZERO,
            SeekOrigin::Duration => self.position,
        };
        let mut target = TimeDelta::from_std(base)
            .ok()
            .and_then(|b| b.checked_add(&offset))
            .and_then(|t| t.to_std().ok())
            .unwrap_or(Duration::ZERO);

        let duration = self.duration();
        if self.source.is_none() {
            target = Duration::ZERO;
        } else if target >= duration || self.max_position.is_some_and(|max| target >= max) {
            target = if self.settings.repeat_enabled {
                Duration::ZERO
            } else {
                duration
            };
        }

        let forward = force_seek_forward
            || (origin == SeekOrigin::Duration && offset >= TimeDelta::zero());
        let coerced = self.coerce(target, SeekDirection::from_forward(forward));
        trace!(?target, ?coerced, forward, "seek");
        self.set_position(coerced);
    }

    /// Constrain the position to `[min, max]`. `max` is limited to the
    /// duration and `min` to `[0, max]`.
    pub fn set_position_range(&mut self, min: Duration, max: Duration) {
        if self.source.is_none() {
            return;
        }

        let max = max.min(self.duration());
        let min = min.min(max);
        self.max_position = Some(max);
        self.min_position = Some(min);

        let clamped = ensure_in_range(self.position, min, max);
        self.set_position(clamped);
    }

    pub fn clear_position_range(&mut self) {
        self.min_position = None;
        self.max_position = None;
    }

    /// Bind the player for the current position, handing off from the
    /// previous one if the position moved to another segment.
    fn apply_position(&mut self) {
        if !self.is_media_opened {
            return;
        }

        let found = self
            .segments
            .find(self.position)
            .map(|(index, segment)| (index, segment.offset()));
        let target = found.map(|(index, _)| index);

        if self.active == target {
            if let (Some((index, offset)), false) = (found, self.updating_position) {
                self.set_player_position(index, self.position.saturating_sub(offset));
            }
            return;
        }

        let previous = self.active;
        self.internal_pause();

        let Some((index, offset)) = found else {
            self.active = None;
            self.events.push(ElementEvent::SegmentChanged(None));
            // Players do not always report the end of media; ending here keeps
            // the position out of unplayable space.
            if previous.is_some() {
                self.end_playback();
            }
            return;
        };

        debug!(from = ?previous, to = %index, position_ms = self.position.as_millis() as u64, "segment handoff");
        self.active = Some(index);
        self.events.push(ElementEvent::SegmentChanged(Some(index)));
        self.check_is_buffering();
        self.set_player_position(index, self.position.saturating_sub(offset));

        if self.is_playing {
            self.internal_play();
        }
    }

    /// Seek a player unless it is already within the seek tolerance.
    fn set_player_position(&mut self, index: SegmentIndex, target: Duration) {
        let tolerance = self.settings.seek_tolerance;
        let Some(slot) = self.players.get_mut(index.0) else {
            return;
        };
        let current = slot.player.position();
        let delta = if current > target {
            current - target
        } else {
            target - current
        };
        if delta > tolerance {
            slot.player.set_position(target);
        }
    }

    // === Transport ===

    pub fn play(&mut self) {
        if self.is_playing {
            return;
        }
        self.set_playing(true);

        if self.is_media_opened {
            self.rewind_if_at_end();
            self.internal_play();
        } else if !self.is_media_opening && self.has_media_content {
            self.rewind_if_at_end();
            self.open_media();
        }
    }

    pub fn pause(&mut self) {
        if !self.is_playing {
            return;
        }
        self.set_playing(false);
        self.internal_pause();
    }

    pub fn toggle_play_pause(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
        self.events.push(ElementEvent::PlayingChanged(playing));
    }

    fn rewind_if_at_end(&mut self) {
        if self.source.is_some() && self.position == self.duration() {
            self.set_position(Duration::ZERO);
        }
    }

    fn internal_play(&mut self) {
        let Some(index) = self.active else {
            return;
        };

        self.apply_position();

        if let Some(slot) = self.players.get_mut(index.0) {
            slot.player.play();
        }
        self.position_timer.start();
    }

    fn internal_pause(&mut self) {
        let Some(index) = self.active else {
            return;
        };
        if let Some(slot) = self.players.get_mut(index.0) {
            slot.player.pause();
        }
    }

    fn seek_next_segment(&mut self, index: SegmentIndex) {
        let next_offset = self.segments.next(index).map(|(_, s)| s.offset());
        match next_offset {
            Some(offset) if !self.max_position.is_some_and(|max| offset >= max) => {
                self.set_position(offset)
            }
            _ => self.end_playback(),
        }
    }

    fn end_playback(&mut self) {
        if self.settings.repeat_enabled {
            debug!("end of media, repeating");
            self.set_position(Duration::ZERO);
            self.apply_position();
        } else {
            debug!("end of media");
            self.pause();
            let duration = self.duration();
            self.set_position(duration);
            self.events.push(ElementEvent::PlaybackEnded);
        }
    }

    // === Buffering ===

    fn check_is_buffering(&mut self) {
        if !self.is_media_buffering && self.active_player_buffering() {
            self.buffering_timer.start();
        }
    }

    fn active_player_buffering(&self) -> bool {
        self.active
            .and_then(|index| self.players.get(index.0))
            .is_some_and(|slot| slot.player.is_buffering())
    }

    fn set_buffering(&mut self, buffering: bool) {
        if self.is_media_buffering != buffering {
            self.is_media_buffering = buffering;
            self.events.push(ElementEvent::BufferingChanged(buffering));
        }
    }

    fn on_buffering_tick(&mut self) {
        let buffering = self.active_player_buffering();
        self.set_buffering(buffering);
        if buffering {
            self.buffering_progress = self
                .active
                .and_then(|index| self.players.get(index.0))
                .map_or(0.0, |slot| slot.player.buffering_progress());
        } else {
            self.buffering_timer.stop();
            self.buffering_progress = 0.0;
        }
    }

    // === Event loop ===

    /// Apply pending player callbacks and run timers for `elapsed` host time.
    pub fn advance(&mut self, elapsed: Duration) {
        self.pump();

        if self.open_check_timer.advance(elapsed) {
            self.check_media_opened();
        }
        if self.buffering_timer.advance(elapsed) {
            self.on_buffering_tick();
        }
        if self.position_timer.advance(elapsed) {
            self.on_position_tick();
        }
    }

    /// Apply pending player callbacks without advancing timers.
    ///
    /// Callbacks raised while these are handled (a reopened player reporting
    /// success, say) wait for the next pump.
    pub fn pump(&mut self) {
        let pending: Vec<PlayerEvent> = self.event_rx.try_iter().collect();
        for event in pending {
            self.handle_player_event(event);
        }
    }

    fn handle_player_event(&mut self, event: PlayerEvent) {
        if event.generation != self.generation {
            trace!(index = %event.index, "ignoring callback from previous source");
            return;
        }
        if event.index.0 >= self.players.len() {
            return;
        }

        match event.kind {
            PlayerEventKind::Opened => self.on_player_opened(event.index),
            PlayerEventKind::Failed { code, message } => {
                self.on_player_failed(event.index, code, &message)
            }
            PlayerEventKind::Ended => {
                if self.active == Some(event.index) {
                    debug!(index = %event.index, "player ended");
                    self.seek_next_segment(event.index);
                }
            }
            PlayerEventKind::BufferingStarted => {
                if self.active == Some(event.index) {
                    self.check_is_buffering();
                }
            }
        }
    }

    fn on_player_opened(&mut self, index: SegmentIndex) {
        let Some(slot) = self.players.get_mut(index.0) else {
            return;
        };
        if slot.was_opened {
            return;
        }
        debug!(%index, "player opened");
        slot.was_opened = true;
        self.opened_count += 1;
        self.check_media_opened();
    }

    fn on_player_failed(&mut self, index: SegmentIndex, code: Option<u32>, message: &str) {
        self.is_media_opening = false;

        let was_opened = self
            .players
            .get(index.0)
            .is_some_and(|slot| slot.was_opened);
        if FailureCause::classify(code).is_transient() && was_opened {
            self.reopen_player(index);
            return;
        }

        let uri = self
            .segments
            .get(index)
            .and_then(|s| s.source())
            .unwrap_or_default();
        let error = MediaError::from_failure(uri, code, message);
        warn!(%index, error = %error, "media failed");
        self.media_error = Some(error.clone());
        self.events.push(ElementEvent::MediaFailed(error));
    }

    fn on_position_tick(&mut self) {
        if !self.is_playing {
            self.position_timer.stop();
            return;
        }

        let Some(index) = self.active else {
            return;
        };
        let (Some(segment), Some(slot)) = (self.segments.get(index), self.players.get(index.0))
        else {
            return;
        };

        let relative = slot.player.position();
        let absolute = segment.offset().saturating_add(relative);
        // Past the end of this chunk but not of the whole file: the player
        // will not report an end, so advance here.
        let past_segment = absolute >= segment.end()
            && slot
                .player
                .natural_duration()
                .is_some_and(|natural| relative < natural);
        let past_max = self.max_position.is_some_and(|max| absolute >= max);

        if past_segment || past_max {
            self.seek_next_segment(index);
        } else {
            self.updating_position = true;
            self.set_position(absolute);
            self.updating_position = false;
        }
    }
}
