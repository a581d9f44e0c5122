//! Integration tests for configuration loading and the config command

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use scrubline::timeline::TimerMode;
use scrubline::Config;

fn scrubline() -> Command {
    Command::cargo_bin("scrubline").expect("binary is built")
}

// ============================================================================
// Config Show Tests
// ============================================================================

#[test]
fn config_show_prints_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    scrubline()
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[playback]"))
        .stdout(predicate::str::contains("[timeline]"))
        .stdout(predicate::str::contains("resume_delay_ms = 450"))
        .stdout(predicate::str::contains(
            "timer_mode = \"elapsed-with-duration\"",
        ));
}

#[test]
fn config_show_reflects_file_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[playback]\nrepeat_enabled = true\n").unwrap();

    scrubline()
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("repeat_enabled = true"))
        .stdout(predicate::str::contains("markers_locked = true"));
}

#[test]
fn config_show_fails_on_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[timeline]\ntimer_mode = \"sideways\"\n").unwrap();

    scrubline()
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("config.toml"));
}

#[test]
fn config_path_honours_override() {
    scrubline()
        .args(["config", "path", "--config", "/tmp/elsewhere.toml"])
        .assert()
        .success()
        .stdout("/tmp/elsewhere.toml\n");
}

// ============================================================================
// Config Effects Tests
// ============================================================================

#[test]
fn repeat_from_config_applies_to_play() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[playback]\nrepeat_enabled = true\n").unwrap();
    let project = crate::helpers::fixture("call.json");

    scrubline()
        .arg("play")
        .arg(&project)
        .args(["--from", "14", "--for", "3", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("ended").not());
}

#[test]
fn saved_config_round_trips_through_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scrubline").join("config.toml");

    let mut config = Config::default();
    config.timeline.timer_mode = TimerMode::Remaining;
    config.timeline.fast_seek_step_ms = 500;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.timeline.settings().fast_seek_step.as_millis(), 500);
    assert_eq!(loaded.timeline.settings().timer_mode, TimerMode::Remaining);
}
