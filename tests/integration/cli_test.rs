//! Integration tests for the inspect, seek and play commands (CLI)

use crate::helpers::{fixture, run_scrubline};

fn call_fixture() -> String {
    fixture("call.json").display().to_string()
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let (stdout, _stderr, exit_code) = run_scrubline(&["--help"]);

    assert_eq!(exit_code, 0);
    for command in ["inspect", "seek", "play", "config"] {
        assert!(stdout.contains(command), "missing {command}");
    }
}

#[test]
fn play_without_length_is_a_usage_error() {
    let (_stdout, stderr, exit_code) = run_scrubline(&["play", &call_fixture()]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("--for"));
}

// ============================================================================
// Inspect Tests
// ============================================================================

#[test]
fn inspect_lists_segments_gaps_and_markers() {
    let (stdout, stderr, exit_code) = run_scrubline(&["inspect", &call_fixture()]);

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    insta::assert_snapshot!(stdout, @r"
Project:  call-1042
Duration: 00:16.000
Video:    no

Segments:
  #0  00:00.000 - 00:06.000  part1.wav
      00:06.000 - 00:10.000  (gap)
  #1  00:10.000 - 00:16.000  part2.wav

Markers:
  00:00.500              point  Call start [system, read-only]
  00:02.000              point  Time Tag: greeting
  00:11.000 - 00:12.500  range  Hold: on hold
");
}

#[test]
fn inspect_missing_file_exits_nonzero_with_path() {
    let (_stdout, stderr, exit_code) = run_scrubline(&["inspect", "missing-project.json"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("missing-project.json"));
}

#[test]
fn inspect_rejects_negative_offsets() {
    let path = fixture("invalid_segment.json").display().to_string();
    let (_stdout, stderr, exit_code) = run_scrubline(&["inspect", &path]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("segment 0"));
}

#[test]
fn inspect_rejects_segment_ending_past_time_range() {
    let path = fixture("overflowing_segment.json").display().to_string();
    let (_stdout, stderr, exit_code) = run_scrubline(&["inspect", &path]);

    assert_eq!(exit_code, 1, "stderr: {stderr}");
    assert!(stderr.contains("segment 0"));
    assert!(!stderr.contains("panicked"));
}

// ============================================================================
// Seek Tests
// ============================================================================

#[test]
fn seek_into_gap_snaps_forward() {
    let (stdout, _stderr, exit_code) = run_scrubline(&["seek", &call_fixture(), "--to", "7"]);

    assert_eq!(exit_code, 0);
    assert_eq!(
        stdout,
        "Requested: 7.000s\nPosition:  00:10.000\nSegment:   #1 part2.wav\n"
    );
}

#[test]
fn seek_into_gap_backward_snaps_to_previous_end() {
    let (stdout, _stderr, exit_code) =
        run_scrubline(&["seek", &call_fixture(), "--to", "7", "--backward"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Position:  00:06.000"));
    assert!(stdout.contains("Segment:   #0 part1.wav"));
}

#[test]
fn seek_past_end_stops_at_duration() {
    let (stdout, _stderr, _) = run_scrubline(&["seek", &call_fixture(), "--to", "40"]);
    assert!(stdout.contains("Position:  00:16.000"));
}

#[test]
fn seek_before_start_stays_at_zero() {
    let (stdout, _stderr, exit_code) = run_scrubline(&["seek", &call_fixture(), "--to", "-3"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Position:  00:00.000"));
}

// ============================================================================
// Play Tests
// ============================================================================

#[test]
fn play_hands_off_across_the_gap() {
    let (stdout, stderr, exit_code) = run_scrubline(&["play", &call_fixture(), "--for", "8"]);

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert!(stdout.contains("[00:00.000] segment #0 part1.wav"));
    assert!(stdout.contains("[00:10.000] segment #1 part2.wav"));
    assert!(stdout.contains("Stopped at 00:12.000 (playing)"));
}

#[test]
fn play_to_the_end_reports_ended() {
    let (stdout, _stderr, exit_code) =
        run_scrubline(&["play", &call_fixture(), "--from", "14", "--for", "3"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[00:16.000] ended"));
    assert!(stdout.contains("Stopped at 00:16.000 (paused)"));
}

#[test]
fn play_with_repeat_wraps_to_start() {
    let (stdout, _stderr, exit_code) = run_scrubline(&[
        "play",
        &call_fixture(),
        "--from",
        "14",
        "--for",
        "3",
        "--repeat",
    ]);

    assert_eq!(exit_code, 0);
    assert!(!stdout.contains("ended"));
    assert!(stdout.contains("Stopped at 00:01.000 (playing)"));
}

#[test]
fn play_rejects_zero_step() {
    let (_stdout, stderr, exit_code) = run_scrubline(&[
        "play",
        &call_fixture(),
        "--for",
        "1",
        "--step-ms",
        "0",
    ]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Step"));
}

#[test]
fn play_rejects_start_beyond_time_range() {
    let (_stdout, stderr, exit_code) =
        run_scrubline(&["play", &call_fixture(), "--from", "1e30", "--for", "1"]);

    assert_eq!(exit_code, 1, "stderr: {stderr}");
    assert!(stderr.contains("Invalid start position"));
}

#[test]
fn play_rejects_range_beyond_time_range() {
    let (_stdout, stderr, exit_code) = run_scrubline(&[
        "play",
        &call_fixture(),
        "--for",
        "1",
        "--range",
        "0",
        "1e30",
    ]);

    assert_eq!(exit_code, 1, "stderr: {stderr}");
    assert!(stderr.contains("Invalid range end"));
}

#[test]
fn seek_far_past_the_end_stops_at_duration() {
    let (stdout, stderr, exit_code) =
        run_scrubline(&["seek", &call_fixture(), "--to", "1e30"]);

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Position:  00:16.000"));
}
