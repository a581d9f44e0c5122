//! Integration tests for the timeline control working against host markers

use std::time::Duration;

use scrubline::markers::{MarkerProperty, MediaMarker, Modification};
use scrubline::media::{PlaybackSettings, SimulatedBackend};
use scrubline::timeline::{
    ControlEvent, GuideKind, GuideLine, MarkerChange, PointerArea, PointerEvent, Selection,
    TimelineControl, TimelineSettings,
};
use scrubline::Project;

use crate::helpers::{fixture, ms, secs};

// 256px over the 16s fixture: 16px per second.
fn px(seconds: f64) -> f64 {
    seconds * 16.0
}

fn setup() -> (TimelineControl<SimulatedBackend>, Vec<MediaMarker>) {
    let project = Project::load(&fixture("call.json")).unwrap();
    let mut markers = project.markers();
    let mut control = TimelineControl::new(
        SimulatedBackend::new(),
        PlaybackSettings::default(),
        TimelineSettings::default(),
        256.0,
        32.0,
    );
    control.set_source(Some(project.source()), &mut markers);
    control.advance(ms(100));
    control.take_events();
    (control, markers)
}

fn modifications(control: &mut TimelineControl<SimulatedBackend>) -> Vec<Modification> {
    control
        .take_events()
        .into_iter()
        .filter_map(|e| match e {
            ControlEvent::MarkerModified(m) => Some(m),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Marker Display Tests
// ============================================================================

#[test]
fn system_tags_are_hidden_until_filter_allows_them() {
    let (mut control, mut markers) = setup();
    assert_eq!(control.slider().len(), 2);

    control.set_filter_read_only(true, &mut markers);
    assert_eq!(control.slider().len(), 3);
}

#[test]
fn guide_lines_follow_marker_visuals() {
    let (control, markers) = setup();
    assert_eq!(
        control.guide_lines(&markers),
        vec![
            GuideLine { position: px(2.0), kind: GuideKind::Point },
            GuideLine { position: px(11.0), kind: GuideKind::RangeEdge },
            GuideLine { position: px(12.5), kind: GuideKind::RangeEdge },
        ]
    );
}

// ============================================================================
// Navigation Tests
// ============================================================================

#[test]
fn skipping_visits_visible_markers_in_order() {
    let (mut control, mut markers) = setup();

    control.skip_next(&markers);
    assert_eq!(control.position(), secs(2));

    control.skip_next(&markers);
    assert_eq!(control.position(), secs(11));
    assert_eq!(
        control.selection(),
        Some(Selection::new(secs(11), Duration::from_millis(12_500)))
    );

    control.set_filter_read_only(true, &mut markers);
    control.seek_position_in_seconds(0);
    control.skip_next(&markers);
    assert_eq!(control.position(), ms(500));
}

#[test]
fn double_click_on_marker_seeks_to_it() {
    let (mut control, markers) = setup();
    let hold = markers[2].id();

    control.marker_double_clicked(hold, &markers);
    assert_eq!(control.position(), secs(11));
    assert_eq!(control.selected_range_marker(), Some(hold));
    assert!(control
        .take_events()
        .contains(&ControlEvent::SeekToMarker(Some(hold))));
}

// ============================================================================
// Marker Editing Tests
// ============================================================================

#[test]
fn add_describe_and_delete_range_marker_through_host() {
    let (mut control, mut markers) = setup();
    let area = PointerArea::Timescale;
    control.pointer_event(PointerEvent::Pressed { x: px(3.0), area });
    control.pointer_event(PointerEvent::Moved { x: px(5.0), area });
    control.pointer_event(PointerEvent::Released { x: px(5.0), area });
    control.take_events();

    // the control asks, the host creates
    control.add_marker();
    let request = control
        .take_events()
        .into_iter()
        .find_map(|e| match e {
            ControlEvent::MarkerAdd(request) => Some(request),
            _ => None,
        })
        .unwrap();
    assert_eq!(request.start_time, secs(3));
    assert_eq!(request.duration, Some(secs(2)));

    let marker = MediaMarker::range(request.start_time, secs(2), "");
    let id = marker.id();
    markers.push(marker);
    control.markers_changed(MarkerChange::Added(id), &mut markers);
    assert_eq!(control.selected_range_marker(), Some(id));
    assert!(control.slider().range(id).unwrap().editor().is_focused());

    // describe
    control.edit_marker_description(id, "pricing");
    control.commit_marker_edit(id);
    assert_eq!(
        modifications(&mut control),
        vec![Modification::describe(id, "pricing")]
    );
    let index = markers.iter().position(|m| m.id() == id).unwrap();
    markers[index].set_description("pricing");
    control.marker_property_changed(&markers, id, MarkerProperty::Description);
    assert_eq!(control.slider().range(id).unwrap().description(), "pricing");

    // delete
    control.delete_marker(id);
    assert_eq!(modifications(&mut control), vec![Modification::delete(id)]);
    markers.remove(index);
    control.markers_changed(MarkerChange::Removed(id), &mut markers);
    assert!(!control.slider().contains(id));
    assert!(control.selected_range_marker().is_none());
}

#[test]
fn read_only_markers_refuse_edits() {
    let (mut control, mut markers) = setup();
    control.set_filter_read_only(true, &mut markers);
    let system = markers[0].id();

    control.edit_marker_description(system, "changed");
    control.commit_marker_edit(system);
    control.delete_marker(system);
    assert!(modifications(&mut control).is_empty());
}

#[test]
fn unlocked_point_drag_requests_new_start() {
    let (mut control, markers) = setup();
    control.set_markers_locked(false);
    let greeting = markers[1].id();

    control.thumb_drag_started(greeting);
    control.thumb_drag_delta(greeting, px(2.0));
    control.thumb_drag_completed(greeting, px(2.0), &markers);

    assert_eq!(
        modifications(&mut control),
        vec![Modification::retime(greeting, "greeting", secs(4), None)]
    );
}

#[test]
fn locked_point_drag_changes_nothing() {
    let (mut control, markers) = setup();
    let greeting = markers[1].id();

    control.thumb_drag_started(greeting);
    control.thumb_drag_delta(greeting, px(2.0));
    control.thumb_drag_completed(greeting, px(2.0), &markers);

    assert!(modifications(&mut control).is_empty());
    assert_eq!(control.slider().thumb(greeting).unwrap().left(), px(2.0));
}
