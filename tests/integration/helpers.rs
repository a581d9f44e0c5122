//! Shared helpers for integration tests

use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use scrubline::media::{PlaybackElement, PlaybackSettings, SimulatedBackend};

/// Directory holding the JSON fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Run the scrubline binary and capture its output.
pub fn run_scrubline(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_scrubline"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute scrubline");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

pub fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// A coordinator with simulated players, and the backend that drives their clock.
pub fn simulated_element() -> (PlaybackElement<SimulatedBackend>, SimulatedBackend) {
    let backend = SimulatedBackend::new();
    let element = PlaybackElement::new(backend.clone(), PlaybackSettings::default());
    (element, backend)
}

/// Advance players and coordinator together in `step` increments.
pub fn run_for(
    element: &mut PlaybackElement<SimulatedBackend>,
    backend: &SimulatedBackend,
    total: Duration,
    step: Duration,
) {
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        backend.advance(step);
        element.advance(step);
        elapsed += step;
    }
}
