//! Integration tests for segmented playback through simulated players

use scrubline::media::failure::codes;
use scrubline::media::{ElementEvent, FailureCause, SegmentIndex};
use scrubline::Project;

use crate::helpers::{fixture, ms, run_for, secs, simulated_element};

fn call_project() -> Project {
    Project::load(&fixture("call.json")).unwrap()
}

// ============================================================================
// Continuous Playback Tests
// ============================================================================

#[test]
fn playback_crosses_gap_into_next_segment() {
    let (mut element, backend) = simulated_element();
    element.set_source(Some(call_project().source()));
    element.pump();
    assert!(element.is_media_opened());

    element.play();
    run_for(&mut element, &backend, ms(6_500), ms(10));

    assert_eq!(element.active_segment(), Some(SegmentIndex(1)));
    assert_eq!(element.position(), ms(10_500));
    assert!(element.is_playing());
    assert!(element
        .take_events()
        .contains(&ElementEvent::SegmentChanged(Some(SegmentIndex(1)))));
}

#[test]
fn playback_to_the_end_stops_at_duration() {
    let (mut element, backend) = simulated_element();
    element.set_source(Some(call_project().source()));
    element.pump();
    element.set_position(secs(14));

    element.play();
    run_for(&mut element, &backend, secs(3), ms(10));

    assert_eq!(element.position(), secs(16));
    assert!(!element.is_playing());
    assert!(element.take_events().contains(&ElementEvent::PlaybackEnded));
}

#[test]
fn repeat_range_keeps_position_inside() {
    let (mut element, backend) = simulated_element();
    element.set_source(Some(call_project().source()));
    element.pump();
    element.set_repeat_enabled(true);
    element.set_position_range(secs(2), secs(4));
    assert_eq!(element.position(), secs(2));

    element.play();
    for _ in 0..50 {
        run_for(&mut element, &backend, ms(100), ms(10));
        assert!(element.position() >= secs(2) && element.position() <= secs(4));
    }
    assert!(element.is_playing());
}

// ============================================================================
// Seeking Tests
// ============================================================================

#[test]
fn position_set_in_gap_lands_on_next_segment() {
    let (mut element, _backend) = simulated_element();
    element.set_source(Some(call_project().source()));
    element.pump();

    element.set_position(secs(8));
    assert_eq!(element.position(), secs(10));
    assert_eq!(element.active_segment(), Some(SegmentIndex(1)));
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn unsupported_codec_surfaces_as_media_error() {
    let (mut element, backend) = simulated_element();
    backend.fail_on_open("part2.wav", Some(codes::DSHOW_UNSUPPORTED_FORMAT));
    element.set_source(Some(call_project().source()));
    element.pump();

    let error = element.media_error().cloned().unwrap();
    assert_eq!(error.cause(), FailureCause::UnsupportedCodec);
    assert_eq!(error.source_uri(), "part2.wav");
    assert!(!element.is_media_opened());
}

#[test]
fn new_source_clears_previous_error() {
    let (mut element, backend) = simulated_element();
    backend.fail_on_open("part2.wav", None);
    element.set_source(Some(call_project().source()));
    element.pump();
    assert!(element.media_error().is_some());

    element.set_source(None);
    assert!(element.media_error().is_none());
    assert_eq!(element.duration(), secs(0));
}
