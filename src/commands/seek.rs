//! Seek command handler

use std::path::Path;

use anyhow::{bail, Result};
use chrono::TimeDelta;

use scrubline::media::{PlaybackElement, SeekOrigin, SimulatedBackend};
use scrubline::time::format_timestamp;
use scrubline::{Config, Project};

/// Seek a freshly opened project to `to` seconds and show where it lands.
#[cfg(not(tarpaulin_include))]
pub fn handle(path: &Path, to: f64, backward: bool, config: &Config) -> Result<()> {
    if !to.is_finite() {
        bail!("Invalid seek target: {}", to);
    }
    let project = Project::load(path)?;
    let source = project.source();
    let show_hours = source.duration().as_secs() >= 3600;

    let mut element = PlaybackElement::new(SimulatedBackend::new(), config.playback.settings());
    element.set_source(Some(source));
    element.pump();

    let offset = TimeDelta::microseconds((to * 1_000_000.0).round() as i64);
    element.seek(offset, SeekOrigin::BeginTime, !backward);

    println!("Requested: {:.3}s", to);
    println!("Position:  {}", format_timestamp(element.position(), show_hours));
    match element.active_segment() {
        Some(index) => {
            let uri = element
                .segments()
                .get(index)
                .and_then(|s| s.source())
                .unwrap_or_default();
            println!("Segment:   {} {}", index, uri);
        }
        None => println!("Segment:   none"),
    }
    Ok(())
}
