//! Deterministic software player.
//!
//! Stands in for a platform media subsystem: players open immediately (or
//! fail on request), advance on a software clock driven by
//! [`SimulatedBackend::advance`], and report the end of their media once.
//! The backend handle is cheap to clone and every clone sees the same
//! players, so a host can keep one to drive the clock while the coordinator
//! owns another as its factory.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use super::backend::{MediaPlayer, PlayerEventSink, PlayerFactory};
use super::segment::{MediaSegment, SegmentIndex};

#[derive(Debug)]
struct PlayerRecord {
    uri: String,
    index: SegmentIndex,
    natural: Duration,
    position: Duration,
    opened: bool,
    closed: bool,
    playing: bool,
    ended_reported: bool,
    buffering: bool,
    buffering_progress: f64,
    volume: f64,
    balance: f64,
    muted: bool,
    seek_count: usize,
    sink: Option<PlayerEventSink>,
}

#[derive(Debug, Default)]
struct BackendState {
    players: Vec<PlayerRecord>,
    natural_overrides: HashMap<String, Duration>,
    download_progress: HashMap<String, f64>,
    open_failures: HashMap<String, Option<u32>>,
}

impl BackendState {
    fn latest(&self, uri: &str) -> Option<&PlayerRecord> {
        self.players.iter().rev().find(|p| p.uri == uri)
    }

    fn latest_mut(&mut self, uri: &str) -> Option<&mut PlayerRecord> {
        self.players.iter_mut().rev().find(|p| p.uri == uri)
    }
}

/// Factory and clock for [`SimulatedPlayer`]s.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend {
    state: Rc<RefCell<BackendState>>,
}

impl SimulatedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every playing player by `elapsed`.
    ///
    /// A player reaching its natural duration stops at the end and reports
    /// the end once; it keeps its playing flag, so seeking it back resumes.
    pub fn advance(&self, elapsed: Duration) {
        let mut state = self.state.borrow_mut();
        for player in state.players.iter_mut() {
            if !player.opened || player.closed || !player.playing || player.buffering {
                continue;
            }
            player.position = player.position.saturating_add(elapsed).min(player.natural);
            if player.position >= player.natural && !player.ended_reported {
                player.ended_reported = true;
                if let Some(sink) = &player.sink {
                    sink.ended();
                }
            }
        }
    }

    /// Number of players created so far, including closed ones.
    pub fn created(&self) -> usize {
        self.state.borrow().players.len()
    }

    /// Make media at `uri` longer or shorter than its segment.
    pub fn set_natural_duration(&self, uri: &str, natural: Duration) {
        let mut state = self.state.borrow_mut();
        state.natural_overrides.insert(uri.to_string(), natural);
        for player in state.players.iter_mut().filter(|p| p.uri == uri) {
            player.natural = natural;
        }
    }

    pub fn set_download_progress(&self, uri: &str, progress: f64) {
        self.state
            .borrow_mut()
            .download_progress
            .insert(uri.to_string(), progress);
    }

    /// Every future open of `uri` fails with `code`.
    pub fn fail_on_open(&self, uri: &str, code: Option<u32>) {
        self.state
            .borrow_mut()
            .open_failures
            .insert(uri.to_string(), code);
    }

    /// Report a failure from the most recent player of `uri`.
    pub fn fail(&self, uri: &str, code: Option<u32>, message: &str) {
        let state = self.state.borrow();
        if let Some(sink) = state.latest(uri).and_then(|p| p.sink.as_ref()) {
            sink.failed(code, message);
        }
    }

    pub fn start_buffering(&self, uri: &str, progress: f64) {
        let mut state = self.state.borrow_mut();
        if let Some(player) = state.latest_mut(uri) {
            player.buffering = true;
            player.buffering_progress = progress;
            if let Some(sink) = &player.sink {
                sink.buffering_started();
            }
        }
    }

    pub fn stop_buffering(&self, uri: &str) {
        let mut state = self.state.borrow_mut();
        if let Some(player) = state.latest_mut(uri) {
            player.buffering = false;
            player.buffering_progress = 0.0;
        }
    }

    pub fn is_playing(&self, uri: &str) -> bool {
        self.state
            .borrow()
            .latest(uri)
            .is_some_and(|p| p.playing && !p.closed)
    }

    pub fn position(&self, uri: &str) -> Option<Duration> {
        self.state.borrow().latest(uri).map(|p| p.position)
    }

    pub fn seek_count(&self, uri: &str) -> usize {
        self.state.borrow().latest(uri).map_or(0, |p| p.seek_count)
    }

    pub fn volume(&self, uri: &str) -> Option<f64> {
        self.state.borrow().latest(uri).map(|p| p.volume)
    }

    pub fn balance(&self, uri: &str) -> Option<f64> {
        self.state.borrow().latest(uri).map(|p| p.balance)
    }

    pub fn muted(&self, uri: &str) -> Option<bool> {
        self.state.borrow().latest(uri).map(|p| p.muted)
    }

    /// Segment index the most recent player of `uri` was created for.
    pub fn index_of(&self, uri: &str) -> Option<SegmentIndex> {
        self.state.borrow().latest(uri).map(|p| p.index)
    }
}

impl PlayerFactory for SimulatedBackend {
    type Player = SimulatedPlayer;

    fn create(&mut self, index: SegmentIndex, segment: &MediaSegment) -> SimulatedPlayer {
        let mut state = self.state.borrow_mut();
        let uri = segment.source().unwrap_or_default().to_string();
        let natural = state
            .natural_overrides
            .get(&uri)
            .copied()
            .unwrap_or_else(|| segment.duration());

        state.players.push(PlayerRecord {
            uri,
            index,
            natural,
            position: Duration::ZERO,
            opened: false,
            closed: false,
            playing: false,
            ended_reported: false,
            buffering: false,
            buffering_progress: 0.0,
            volume: 1.0,
            balance: 0.0,
            muted: false,
            seek_count: 0,
            sink: None,
        });

        SimulatedPlayer {
            id: state.players.len() - 1,
            state: Rc::clone(&self.state),
        }
    }
}

/// A player whose clock only moves when its backend is advanced.
#[derive(Debug)]
pub struct SimulatedPlayer {
    id: usize,
    state: Rc<RefCell<BackendState>>,
}

impl SimulatedPlayer {
    fn read<T>(&self, f: impl FnOnce(&PlayerRecord) -> T) -> Option<T> {
        self.state.borrow().players.get(self.id).map(f)
    }

    fn write(&self, f: impl FnOnce(&mut PlayerRecord)) {
        if let Some(record) = self.state.borrow_mut().players.get_mut(self.id) {
            f(record);
        }
    }
}

impl MediaPlayer for SimulatedPlayer {
    fn open(&mut self, source: &str, events: PlayerEventSink) {
        let failure = self.state.borrow().open_failures.get(source).copied();
        self.write(|p| {
            p.uri = source.to_string();
            p.closed = false;
            p.position = Duration::ZERO;
            p.ended_reported = false;
            match failure {
                Some(code) => {
                    p.opened = false;
                    events.failed(code, "simulated open failure");
                }
                None => {
                    p.opened = true;
                    events.opened();
                }
            }
            p.sink = Some(events);
        });
    }

    fn close(&mut self) {
        self.write(|p| {
            p.closed = true;
            p.opened = false;
            p.playing = false;
        });
    }

    fn play(&mut self) {
        self.write(|p| p.playing = true);
    }

    fn pause(&mut self) {
        self.write(|p| p.playing = false);
    }

    fn position(&self) -> Duration {
        self.read(|p| p.position).unwrap_or_default()
    }

    fn set_position(&mut self, position: Duration) {
        self.write(|p| {
            p.position = position.min(p.natural);
            p.seek_count += 1;
            if p.position < p.natural {
                p.ended_reported = false;
            }
        });
    }

    fn natural_duration(&self) -> Option<Duration> {
        self.read(|p| p.opened.then_some(p.natural)).flatten()
    }

    fn is_buffering(&self) -> bool {
        self.read(|p| p.buffering).unwrap_or(false)
    }

    fn buffering_progress(&self) -> f64 {
        self.read(|p| p.buffering_progress).unwrap_or(0.0)
    }

    fn download_progress(&self) -> f64 {
        let state = self.state.borrow();
        state
            .players
            .get(self.id)
            .and_then(|p| state.download_progress.get(&p.uri).copied())
            .unwrap_or(1.0)
    }

    fn set_volume(&mut self, volume: f64) {
        self.write(|p| p.volume = volume);
    }

    fn set_balance(&mut self, balance: f64) {
        self.write(|p| p.balance = balance);
    }

    fn set_muted(&mut self, muted: bool) {
        self.write(|p| p.muted = muted);
    }
}
