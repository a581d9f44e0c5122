//! Play command handler
//!
//! Drives the coordinator with simulated players on a fixed step and prints
//! what a host would see: segment handoffs, buffering, failures and the end.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use scrubline::media::{ElementEvent, PlaybackElement, SimulatedBackend};
use scrubline::time::{checked_secs_to_duration, format_timestamp};
use scrubline::{Config, Project};

/// Options for a simulated playback run.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub duration: f64,
    pub from: f64,
    pub repeat: bool,
    pub range: Option<(f64, f64)>,
    pub step_ms: u64,
}

#[cfg(not(tarpaulin_include))]
pub fn handle(path: &Path, options: &PlayOptions, config: &Config) -> Result<()> {
    let total = seconds_arg("playback length", options.duration)?;
    let from = seconds_arg("start position", options.from)?;
    let range = match options.range {
        Some((start, end)) => Some((
            seconds_arg("range start", start)?,
            seconds_arg("range end", end)?,
        )),
        None => None,
    };
    if options.step_ms == 0 {
        bail!("Step must be at least 1 ms");
    }

    let project = Project::load(path)?;
    let source = project.source();
    let show_hours = source.duration().as_secs() >= 3600;
    let stamp = |d: Duration| format_timestamp(d, show_hours);

    let mut settings = config.playback.settings();
    settings.repeat_enabled |= options.repeat;
    settings.auto_open_media = true;

    let backend = SimulatedBackend::new();
    let mut element = PlaybackElement::new(backend.clone(), settings);
    element.set_source(Some(source));
    element.pump();
    if let Some(error) = element.media_error() {
        bail!("Failed to open media: {}", error);
    }

    if let Some((start, end)) = range {
        element.set_position_range(start, end);
    }
    element.set_position(from);

    println!(
        "Playing {} from {} for {:.3}s",
        path.display(),
        stamp(element.position()),
        options.duration
    );

    element.play();
    report(&mut element, &stamp);

    let step = Duration::from_millis(options.step_ms);
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        backend.advance(step);
        element.advance(step);
        elapsed += step;
        report(&mut element, &stamp);
    }

    println!(
        "Stopped at {} ({})",
        stamp(element.position()),
        if element.is_playing() { "playing" } else { "paused" }
    );
    Ok(())
}

/// A non-negative number of seconds that fits in a `Duration`.
fn seconds_arg(what: &str, seconds: f64) -> Result<Duration> {
    checked_secs_to_duration(seconds)
        .with_context(|| format!("Invalid {}: {}", what, seconds))
}

fn report(element: &mut PlaybackElement<SimulatedBackend>, stamp: &dyn Fn(Duration) -> String) {
    for event in element.take_events() {
        let at = stamp(element.position());
        match event {
            ElementEvent::SegmentChanged(Some(index)) => {
                let uri = element
                    .segments()
                    .get(index)
                    .and_then(|s| s.source())
                    .unwrap_or_default();
                println!("[{}] segment {} {}", at, index, uri);
            }
            ElementEvent::SegmentChanged(None) => println!("[{}] no segment", at),
            ElementEvent::BufferingChanged(true) => println!("[{}] buffering", at),
            ElementEvent::BufferingChanged(false) => println!("[{}] buffering done", at),
            ElementEvent::MediaFailed(error) => println!("[{}] failed: {}", at, error),
            ElementEvent::PlaybackEnded => println!("[{}] ended", at),
            ElementEvent::PositionChanged(_)
            | ElementEvent::PlayingChanged(_)
            | ElementEvent::MediaOpened => {}
        }
    }
}
