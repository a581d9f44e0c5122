//! Interval timers driven by the host clock.
//!
//! Nothing here sleeps or spawns. The owner calls [`Ticker::advance`] with the
//! time that passed and reacts when it reports a tick. Stopping a ticker is
//! how pending work (a buffering check, an open check) is cancelled.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    accumulated: Duration,
    running: bool,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start the ticker. Restarting a running ticker keeps its phase.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.accumulated = Duration::ZERO;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated = Duration::ZERO;
    }

    /// Advance by `elapsed`. Returns true if at least one interval completed.
    ///
    /// Several missed intervals collapse into a single tick.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.running {
            return false;
        }

        self.accumulated = self.accumulated.saturating_add(elapsed);
        if self.interval.is_zero() || self.accumulated >= self.interval {
            self.accumulated = if self.interval.is_zero() {
                Duration::ZERO
            } else {
                Duration::from_nanos((self.accumulated.as_nanos() % self.interval.as_nanos()) as u64)
            };
            return true;
        }

        false
    }
}
