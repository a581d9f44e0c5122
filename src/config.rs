//! Configuration
//!
//! TOML configuration read from `<config dir>/scrubline/config.toml`. Every
//! section and field has a default, so a missing file or a partial one is
//! fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::media::PlaybackSettings;
use crate::timeline::{TimelineSettings, TimerMode};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub timeline: TimelineConfig,
}

/// `[playback]`: the segment coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub auto_open_media: bool,
    pub repeat_enabled: bool,
    pub volume: f64,
    pub balance: f64,
    pub muted: bool,
    pub position_tick_ms: u64,
    pub buffering_tick_ms: u64,
    pub open_check_tick_ms: u64,
    pub seek_tolerance_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        let settings = PlaybackSettings::default();
        Self {
            auto_open_media: settings.auto_open_media,
            repeat_enabled: settings.repeat_enabled,
            volume: settings.volume,
            balance: settings.balance,
            muted: settings.muted,
            position_tick_ms: millis(settings.position_tick),
            buffering_tick_ms: millis(settings.buffering_tick),
            open_check_tick_ms: millis(settings.open_check_tick),
            seek_tolerance_ms: millis(settings.seek_tolerance),
        }
    }
}

impl PlaybackConfig {
    pub fn settings(&self) -> PlaybackSettings {
        PlaybackSettings {
            auto_open_media: self.auto_open_media,
            repeat_enabled: self.repeat_enabled,
            volume: self.volume,
            balance: self.balance,
            muted: self.muted,
            position_tick: Duration::from_millis(self.position_tick_ms),
            buffering_tick: Duration::from_millis(self.buffering_tick_ms),
            open_check_tick: Duration::from_millis(self.open_check_tick_ms),
            seek_tolerance: Duration::from_millis(self.seek_tolerance_ms),
        }
    }
}

/// `[timeline]`: the timeline control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub markers_locked: bool,
    pub filter_read_only: bool,
    pub allow_edit_markers: bool,
    pub mouse_move_tolerance_px: f64,
    pub fast_seek_step_ms: u64,
    pub fast_seek_tick_ms: u64,
    pub resume_delay_ms: u64,
    pub timer_mode: TimerMode,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        let settings = TimelineSettings::default();
        Self {
            markers_locked: settings.markers_locked,
            filter_read_only: settings.filter_read_only,
            allow_edit_markers: settings.allow_edit_markers,
            mouse_move_tolerance_px: settings.mouse_move_tolerance,
            fast_seek_step_ms: millis(settings.fast_seek_step),
            fast_seek_tick_ms: millis(settings.fast_seek_tick),
            resume_delay_ms: millis(settings.resume_delay),
            timer_mode: settings.timer_mode,
        }
    }
}

impl TimelineConfig {
    pub fn settings(&self) -> TimelineSettings {
        TimelineSettings {
            markers_locked: self.markers_locked,
            filter_read_only: self.filter_read_only,
            allow_edit_markers: self.allow_edit_markers,
            mouse_move_tolerance: self.mouse_move_tolerance_px,
            fast_seek_step: Duration::from_millis(self.fast_seek_step_ms),
            fast_seek_tick: Duration::from_millis(self.fast_seek_tick_ms),
            resume_delay: Duration::from_millis(self.resume_delay_ms),
            timer_mode: self.timer_mode,
        }
    }
}

fn millis(value: Duration) -> u64 {
    u64::try_from(value.as_millis()).unwrap_or(u64::MAX)
}

impl Config {
    /// Path of the user configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("scrubline").join("config.toml"))
    }

    /// Load the user configuration, or defaults if there is none.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Save to the user configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}
