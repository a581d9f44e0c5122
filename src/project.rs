//! Project files
//!
//! A project is a JSON description of a segmented recording and its markers,
//! with times in seconds:
//!
//! ```json
//! {
//!   "name": "call-1042",
//!   "segments": [
//!     { "offset": 0.0, "duration": 6.0, "source": "part1.wav" },
//!     { "offset": 6.0, "duration": 4.0 },
//!     { "offset": 10.0, "duration": 6.0, "source": "part2.wav" }
//!   ],
//!   "markers": [{ "start": 2.0, "description": "greeting" }]
//! }
//! ```
//!
//! A segment without a `source` is a gap.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::markers::MediaMarker;
use crate::media::{MediaSegment, MediaSource};
use crate::time::{checked_secs_to_duration, secs_to_duration};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub has_video: bool,
    pub segments: Vec<SegmentEntry>,
    #[serde(default)]
    pub markers: Vec<MarkerEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentEntry {
    pub offset: f64,
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Defaults to `time-tag` for points and `section-tag` for ranges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_key: Option<String>,
    pub start: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub system: bool,
}

impl MarkerEntry {
    pub fn to_marker(&self) -> MediaMarker {
        let type_key = self.type_key.clone().unwrap_or_else(|| {
            if self.length.is_some() {
                "section-tag".to_string()
            } else {
                "time-tag".to_string()
            }
        });
        MediaMarker::with_details(
            self.id,
            type_key,
            self.read_only,
            secs_to_duration(self.start),
            self.length.map(secs_to_duration),
            self.name.clone(),
            self.description.clone(),
            self.system,
        )
    }
}

impl Project {
    /// Parse and validate a project from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let project: Project = serde_json::from_str(json).context("Invalid project JSON")?;
        project.validate()?;
        debug!(
            name = %project.name,
            segments = project.segments.len(),
            markers = project.markers.len(),
            "project parsed"
        );
        Ok(project)
    }

    /// Load a project file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project file: {}", path.display()))?;
        let project = Self::from_json_str(&json)
            .with_context(|| format!("Failed to load project: {}", path.display()))?;
        info!(path = %path.display(), name = %project.name, "project loaded");
        Ok(project)
    }

    fn validate(&self) -> Result<()> {
        for (i, segment) in self.segments.iter().enumerate() {
            if span_end(segment.offset, Some(segment.duration)).is_none() {
                bail!(
                    "segment {} has an invalid offset or duration ({}, {})",
                    i,
                    segment.offset,
                    segment.duration
                );
            }
            if segment.source.as_deref() == Some("") {
                bail!("segment {} has an empty source", i);
            }
        }
        for marker in &self.markers {
            if span_end(marker.start, marker.length).is_none() {
                bail!("marker {} has an invalid start or length", marker.id);
            }
        }
        Ok(())
    }

    /// The media source described by the segments.
    pub fn source(&self) -> MediaSource {
        let segments = self.segments.iter().map(|s| {
            let offset = secs_to_duration(s.offset);
            let duration = secs_to_duration(s.duration);
            match &s.source {
                Some(source) => MediaSegment::new(offset, duration, source.clone()),
                None => MediaSegment::gap(offset, duration),
            }
        });
        MediaSource::new(segments).with_video(self.has_video)
    }

    pub fn markers(&self) -> Vec<MediaMarker> {
        self.markers.iter().map(MarkerEntry::to_marker).collect()
    }
}

/// End of `start + length` seconds, if both are valid times and the end fits
/// in a `Duration`.
fn span_end(start: f64, length: Option<f64>) -> Option<Duration> {
    let start = checked_secs_to_duration(start)?;
    let length = match length {
        Some(length) => checked_secs_to_duration(length)?,
        None => Duration::ZERO,
    };
    start.checked_add(length)
}
