//! Timeline control
//!
//! [`TimelineControl`] ties a [`PlaybackElement`] to a [`MultiThumbSlider`]:
//! it maps pointer gestures to seeks and selections, keeps marker visuals in
//! step with the host's marker collection, and turns visual drags and edits
//! back into requests for the host.
//!
//! The host owns the markers. Operations that need them take the collection
//! as an argument; nothing here keeps a copy.

use std::time::Duration;

use chrono::TimeDelta;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use super::input::{handle_pointer_event, PointerArea, PointerEvent, PointerGesture};
use super::mapping::{marker_guide_lines, pixel_to_time, time_to_pixel, GuideLine};
use super::navigation::{find_marker, marker_at, next_marker, previous_marker};
use super::state::{Selection, SelectionHandle, TimelineState, TimerMode};
use crate::markers::{
    AddRequest, Grip, MarkerProperty, MediaMarker, Modification, MultiThumbSlider, SliderEvent,
};
use crate::media::{
    ElementEvent, MediaError, MediaSource, PlayableSegments, PlaybackElement, PlaybackSettings,
    PlayerFactory, SeekDirection, SeekOrigin, Ticker,
};
use crate::time::TICK;

/// Half the width, in pixels, of the strip around the progress line where a
/// click adds a marker.
const PROGRESS_HIT_SLOP: f64 = 3.0;

/// Marker times that differ by less than this after a pixel round trip are
/// treated as unchanged.
const RETIME_TOLERANCE: Duration = Duration::from_millis(1);

/// Behaviour switches and timings of a timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSettings {
    /// Marker visuals cannot be dragged.
    pub markers_locked: bool,
    /// Show system tags.
    pub filter_read_only: bool,
    pub allow_edit_markers: bool,
    /// Pixels the pointer may travel before a click becomes a selection drag
    pub mouse_move_tolerance: f64,
    /// Seek distance of one fast-forward or rewind tick
    pub fast_seek_step: Duration,
    pub fast_seek_tick: Duration,
    /// Quiet time after a skip before playback resumes
    pub resume_delay: Duration,
    pub timer_mode: TimerMode,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            markers_locked: true,
            filter_read_only: false,
            allow_edit_markers: true,
            mouse_move_tolerance: 3.0,
            fast_seek_step: Duration::from_millis(200),
            fast_seek_tick: Duration::from_millis(10),
            resume_delay: Duration::from_millis(450),
            timer_mode: TimerMode::default(),
        }
    }
}

/// Notifications for the host, drained with [`TimelineControl::take_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// The user interacted with the timeline.
    Activity,
    MediaFailed(MediaError),
    /// The user asked for a new marker.
    MarkerAdd(AddRequest),
    /// The user moved, re-described or deleted a marker.
    MarkerModified(Modification),
    /// Playback jumped to a marker (`None` when there was none to jump to).
    SeekToMarker(Option<Uuid>),
    /// Forwarded from the playback element.
    Playback(ElementEvent),
}

/// How the host's marker collection changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerChange {
    Added(Uuid),
    Removed(Uuid),
    /// Anything else; every visual is rebuilt.
    Reset,
}

pub struct TimelineControl<F: PlayerFactory> {
    element: PlaybackElement<F>,
    slider: MultiThumbSlider,
    settings: TimelineSettings,
    state: TimelineState,
    fast_seek_timer: Ticker,
    events: Vec<ControlEvent>,
}

impl<F: PlayerFactory> TimelineControl<F> {
    pub fn new(
        factory: F,
        playback: PlaybackSettings,
        settings: TimelineSettings,
        width: f64,
        height: f64,
    ) -> Self {
        let mut state = TimelineState::new(width, height);
        state.timer_mode = settings.timer_mode;
        Self {
            element: PlaybackElement::new(factory, playback),
            slider: MultiThumbSlider::new(width, height),
            fast_seek_timer: Ticker::new(settings.fast_seek_tick),
            settings,
            state,
            events: Vec::new(),
        }
    }

    // === Accessors ===

    pub fn element(&self) -> &PlaybackElement<F> {
        &self.element
    }

    /// Direct access for volume, balance and other settings the timeline
    /// does not mediate.
    pub fn element_mut(&mut self) -> &mut PlaybackElement<F> {
        &mut self.element
    }

    pub fn slider(&self) -> &MultiThumbSlider {
        &self.slider
    }

    pub fn state(&self) -> &TimelineState {
        &self.state
    }

    pub fn settings(&self) -> &TimelineSettings {
        &self.settings
    }

    pub fn selection(&self) -> Option<Selection> {
        self.state.selection
    }

    pub fn selected_range_marker(&self) -> Option<Uuid> {
        self.state.selected_range_marker
    }

    pub fn duration(&self) -> Duration {
        self.element.duration()
    }

    pub fn position(&self) -> Duration {
        self.element.position()
    }

    pub fn has_video(&self) -> bool {
        self.element.source().is_some_and(MediaSource::has_video)
    }

    /// Markers can be added and edited only with a source loaded.
    pub fn can_edit_markers(&self) -> bool {
        self.settings.allow_edit_markers && self.element.source().is_some()
    }

    /// Drain pending notifications, including the playback element's.
    pub fn take_events(&mut self) -> Vec<ControlEvent> {
        self.forward_element_events();
        std::mem::take(&mut self.events)
    }

    // === Configuration ===

    /// Load a new source and rebuild the visuals for `markers`.
    pub fn set_source(&mut self, source: Option<MediaSource>, markers: &mut [MediaMarker]) {
        debug!(has_source = source.is_some(), "timeline source changed");
        self.element.set_source(source);
        self.clear_selected_range();
        self.apply_filter(markers);
        self.update_media_markers(markers);
    }

    pub fn resize(&mut self, width: f64, height: f64, markers: &[MediaMarker]) {
        self.state.width = width;
        self.state.height = height;
        self.slider.resize(width, height);
        self.update_media_markers(markers);
    }

    pub fn set_markers_locked(&mut self, locked: bool) {
        self.settings.markers_locked = locked;
        for id in self.slider.order() {
            let read_only = self
                .slider
                .thumb(id)
                .map(|t| t.is_read_only())
                .or_else(|| self.slider.range(id).map(|r| r.is_read_only()))
                .unwrap_or(false);
            self.slider.freeze(id, locked || read_only);
        }
    }

    /// Show or hide system tags.
    pub fn set_filter_read_only(&mut self, show: bool, markers: &mut [MediaMarker]) {
        self.settings.filter_read_only = show;
        self.apply_filter(markers);
        self.update_media_markers(markers);
    }

    pub fn set_allow_edit_markers(&mut self, allow: bool) {
        self.settings.allow_edit_markers = allow;
    }

    /// Turn repeat on or off. With repeat on, playback loops over the
    /// selection, so the position moves into it first.
    pub fn set_repeat_enabled(&mut self, enabled: bool) {
        self.element.set_repeat_enabled(enabled);
        if let Some(selection) = self.state.selection {
            if enabled && !selection.contains(self.element.position()) {
                self.seek_position(selection.start);
            }
        }
        self.apply_selected_range();
    }

    // === Markers ===

    /// Bring the visuals in line with a change to the host's markers.
    pub fn markers_changed(&mut self, change: MarkerChange, markers: &mut [MediaMarker]) {
        if self.element.source().is_none() {
            return;
        }
        self.apply_filter(markers);
        let markers: &[MediaMarker] = markers;

        match change {
            MarkerChange::Added(id) => {
                let Some(marker) = find_marker(markers, id) else {
                    return;
                };
                if marker.is_range() {
                    self.state.selected_range_marker = Some(id);
                }
                if let Some(added) = self.add_visual(marker) {
                    self.slider.bring_to_front(added);
                    self.slider.show_edit(added);
                }
            }
            MarkerChange::Removed(id) => {
                self.slider.remove(id);
                if self.state.selected_range_marker == Some(id) {
                    self.state.selected_range_marker = None;
                }
            }
            MarkerChange::Reset => self.update_media_markers(markers),
        }
    }

    /// Follow a property change on one of the host's markers.
    pub fn marker_property_changed(
        &mut self,
        markers: &[MediaMarker],
        id: Uuid,
        property: MarkerProperty,
    ) {
        match property {
            MarkerProperty::StartTime | MarkerProperty::Length | MarkerProperty::Description => {
                let Some(marker) = find_marker(markers, id) else {
                    return;
                };
                let start = self.time_to_pixel(marker.start_time());
                let end = self.time_to_pixel(marker.end_time());
                if let Err(e) = self.slider.update(id, start, end, marker.description()) {
                    warn!(%id, error = %e, "marker visual not updated");
                }
                if self.state.selected_range_marker == Some(id) {
                    self.set_selected_range(marker.start_time(), marker.end_time());
                }
            }
            MarkerProperty::Visible => self.update_media_markers(markers),
            MarkerProperty::Name => {}
        }
    }

    /// Rebuild every marker visual. An empty timeline shows none.
    fn update_media_markers(&mut self, markers: &[MediaMarker]) {
        self.slider.clear();
        if self.element.duration().is_zero() {
            return;
        }
        for marker in markers {
            self.add_visual(marker);
        }
    }

    /// Add a visual for `marker`. Returns its id if one was added.
    fn add_visual(&mut self, marker: &MediaMarker) -> Option<Uuid> {
        if !marker.is_visible() {
            return None;
        }
        let id = marker.id();
        let start = self.time_to_pixel(marker.start_time());
        let frozen = self.settings.markers_locked || marker.is_read_only();

        if marker.is_range() {
            let end = self.time_to_pixel(marker.end_time());
            match self.slider.add_range(
                id,
                start,
                end,
                marker.name(),
                marker.description(),
                frozen,
                marker.is_read_only(),
            ) {
                Ok(_) => Some(id),
                Err(e) => {
                    warn!(%id, error = %e, "marker range rejected");
                    None
                }
            }
        } else {
            self.slider.add_thumb(
                id,
                start,
                marker.name(),
                marker.description(),
                frozen,
                marker.is_read_only(),
                marker.is_system_tag(),
            );
            Some(id)
        }
    }

    fn apply_filter(&self, markers: &mut [MediaMarker]) {
        let show = self.settings.filter_read_only;
        for marker in markers.iter_mut().filter(|m| m.is_system_tag()) {
            marker.set_visible(show);
        }
    }

    // === Pointer ===

    pub fn pointer_event(&mut self, event: PointerEvent) {
        let hot = self.is_add_marker_hot(event.x(), event.area());
        let gesture = handle_pointer_event(
            event,
            &mut self.state.pointer,
            self.settings.mouse_move_tolerance,
            self.state.changing_selection,
            hot,
        );
        trace!(?gesture, "pointer");

        match gesture {
            PointerGesture::Captured => {
                self.state.changing_selection = false;
                self.add_marker_toggle(true);
            }
            PointerGesture::Pressed => self.state.changing_selection = false,
            PointerGesture::Selecting { from, to } => {
                self.state.selected_range_marker = None;
                self.begin_selection_change();
                let start = self.pixel_to_time(from);
                let end = self.pixel_to_time(to);
                self.set_selected_range(start, end);
                self.add_marker_toggle(true);
            }
            PointerGesture::SelectionFinished => {
                self.finish_selection_change();
                self.notify_activity();
            }
            PointerGesture::Clicked(x) => {
                let position = self.pixel_to_time(x);
                if self
                    .state
                    .selection
                    .is_some_and(|selection| !selection.contains(position))
                {
                    self.clear_selected_range();
                }
                self.seek_position(position);
                self.notify_activity();
            }
            PointerGesture::AddMarker => self.add_marker(),
            PointerGesture::None => {}
        }
    }

    /// A release at `x` would add a marker: over the selection or the
    /// progress line of an audio timeline.
    fn is_add_marker_hot(&self, x: f64, area: PointerArea) -> bool {
        if area != PointerArea::Content
            || !self.can_edit_markers()
            || !self.state.add_marker_enabled
            || self.has_video()
        {
            return false;
        }
        let over_selection = self
            .selection_pixels()
            .is_some_and(|(start, end)| x >= start && x <= end);
        let over_progress = (x - self.progress_pixel()).abs() <= PROGRESS_HIT_SLOP;
        over_selection || over_progress
    }

    // === Selection ===

    /// Drag a selection handle by `dx` pixels.
    ///
    /// # Returns
    /// The handle now under the pointer; dragging one edge past the other
    /// swaps them.
    pub fn selection_handle_drag(&mut self, handle: SelectionHandle, dx: f64) -> SelectionHandle {
        let Some(mut selection) = self.state.selection else {
            return handle;
        };
        self.begin_selection_change();
        self.state.selected_range_marker = None;

        let edge = match handle {
            SelectionHandle::Start => selection.start,
            SelectionHandle::End => selection.end,
        };
        let x = (self.time_to_pixel(edge) + dx).clamp(0.0, self.state.width.max(0.0));
        let moved = self.pixel_to_time(x);
        match handle {
            SelectionHandle::Start => selection.start = moved,
            SelectionHandle::End => selection.end = moved,
        }

        let mut handle = handle;
        if selection.end < selection.start {
            std::mem::swap(&mut selection.start, &mut selection.end);
            handle = handle.opposite();
        }
        self.set_selected_range(selection.start, selection.end);
        handle
    }

    pub fn selection_handle_drag_completed(&mut self) {
        self.finish_selection_change();
        self.add_marker_toggle(true);
    }

    pub fn clear_selection(&mut self) {
        self.clear_selected_range();
    }

    /// Record a selection clipped to the media. It is applied right away
    /// unless a selection drag is in progress.
    fn set_selected_range(&mut self, start: Duration, end: Duration) {
        let end = end.min(self.element.duration());
        self.state.selection = Some(Selection::new(start, end));
        if !self.state.changing_selection {
            self.apply_selected_range();
        }
    }

    /// Snap the selection onto playable media and hand it to the element
    /// as the repeat range.
    fn apply_selected_range(&mut self) {
        if self.element.source().is_none() {
            return;
        }
        if let Some(selection) = self.state.selection {
            let snapped = snap_selection(selection, self.element.segments());
            if snapped.is_none() {
                debug!(?selection, "selection holds no media, cleared");
            }
            self.state.selection = snapped;
        }

        match self.state.selection {
            Some(selection) if self.element.repeat_enabled() => {
                self.element.set_position_range(selection.start, selection.end)
            }
            _ => self.element.clear_position_range(),
        }
    }

    fn clear_selected_range(&mut self) {
        self.state.clear_selection();
        self.element.clear_position_range();
    }

    fn begin_selection_change(&mut self) {
        if !self.state.changing_selection {
            self.state.changing_selection = true;
            self.pause_playing();
        }
    }

    fn finish_selection_change(&mut self) {
        self.state.changing_selection = false;
        self.apply_selected_range();
        if let Some(selection) = self.state.selection {
            self.seek_position(selection.start);
        }
        self.resume_playing();
    }

    // === Transport ===

    pub fn toggle_play_pause(&mut self) {
        self.element.toggle_play_pause();
        self.notify_activity();
    }

    /// Skip back to the previous marker, or to the start. With `to_start`
    /// the position goes to 0 and a marker sitting there is selected.
    pub fn skip_previous(&mut self, to_start: bool, markers: &[MediaMarker]) {
        if to_start {
            self.seek_position(Duration::ZERO);
            let marker = marker_at(markers, self.element.position());
            self.seek_to_marker(marker);
            self.notify_activity();
            return;
        }

        let was_playing = self.element.is_playing();
        let marker = previous_marker(markers, self.element.position());
        self.seek_to_marker(marker);
        if marker.is_none() {
            self.seek_position(Duration::ZERO);
        }
        if was_playing {
            self.request_resume();
        }
        self.notify_activity();
    }

    /// Skip to the next marker, or to the end.
    pub fn skip_next(&mut self, markers: &[MediaMarker]) {
        self.clear_selected_range();

        let was_playing = self.element.is_playing();
        let marker = next_marker(markers, self.element.position());
        self.seek_to_marker(marker);
        if marker.is_none() {
            let end = self.element.duration().saturating_sub(TICK);
            self.seek_position(end);
        }
        if was_playing {
            self.request_resume();
        }
        self.notify_activity();
    }

    /// Move to `marker`. A range marker becomes the selection.
    pub fn seek_to_marker(&mut self, marker: Option<&MediaMarker>) {
        match marker {
            Some(marker) => {
                if marker.start_time() >= self.element.duration() {
                    self.element.pause();
                }
                if marker.is_range() {
                    self.set_selected_range(marker.start_time(), marker.end_time());
                    self.state.selected_range_marker = Some(marker.id());
                } else {
                    self.clear_selected_range();
                }
                self.seek_position(marker.start_time());
            }
            None => self.clear_selected_range(),
        }
        self.events
            .push(ControlEvent::SeekToMarker(marker.map(MediaMarker::id)));
    }

    pub fn seek_to_marker_and_play(&mut self, marker: &MediaMarker) {
        self.seek_to_marker(Some(marker));
        if marker.start_time() < self.element.duration() {
            self.element.play();
        }
    }

    pub fn seek_position_in_seconds(&mut self, seconds: u64) {
        self.seek_position(Duration::from_secs(seconds));
    }

    pub fn marker_double_clicked(&mut self, id: Uuid, markers: &[MediaMarker]) {
        if let Some(marker) = find_marker(markers, id) {
            self.seek_to_marker(Some(marker));
        }
    }

    /// Start fast-forwarding or rewinding until [`Self::fast_seek_released`].
    pub fn fast_seek_pressed(&mut self, direction: SeekDirection) {
        self.pause_playing();
        self.state.fast_seek = Some(direction);
        self.fast_seek_timer.start();
    }

    pub fn fast_seek_released(&mut self) {
        if self.state.fast_seek.take().is_none() {
            return;
        }
        self.fast_seek_timer.stop();
        self.resume_playing();
    }

    /// Ask the host for a marker over the selection, or at the position.
    pub fn add_marker(&mut self) {
        if !self.can_edit_markers() {
            return;
        }
        let request = match self.state.selection {
            Some(selection) => AddRequest {
                start_time: selection.start,
                duration: Some(selection.length()),
            },
            None => AddRequest {
                start_time: self.element.position(),
                duration: None,
            },
        };
        debug!(?request, "marker requested");
        self.events.push(ControlEvent::MarkerAdd(request));
        self.notify_activity();
        self.add_marker_toggle(false);
    }

    pub fn toggle_timer_mode(&mut self) {
        self.state.timer_mode = self.state.timer_mode.next();
    }

    pub fn timer_text(&self) -> String {
        self.state
            .timer_mode
            .format(self.element.position(), self.element.duration())
    }

    fn pause_playing(&mut self) {
        self.state.was_playing = self.element.is_playing();
        if self.state.was_playing {
            self.element.pause();
        }
    }

    fn resume_playing(&mut self) {
        if self.state.was_playing && self.element.position() < self.element.duration() {
            self.element.play();
        }
    }

    /// Pause now and play again once skips stop for the resume delay.
    fn request_resume(&mut self) {
        self.element.pause();
        self.state.resume_countdown = Some(self.settings.resume_delay);
    }

    /// Seek to `position`. Ignored while the media buffers.
    fn seek_position(&mut self, position: Duration) {
        if self.element.is_media_buffering() {
            trace!(?position, "seek skipped while buffering");
            return;
        }
        match TimeDelta::from_std(position) {
            Ok(offset) => self.element.seek(offset, SeekOrigin::BeginTime, true),
            Err(e) => warn!(?position, error = %e, "seek target out of range"),
        }
    }

    fn seek_offset(&mut self, offset: TimeDelta) {
        self.element.seek(offset, SeekOrigin::Duration, false);
    }

    fn add_marker_toggle(&mut self, enabled: bool) {
        if self.can_edit_markers() {
            self.state.add_marker_enabled = enabled;
        }
    }

    fn notify_activity(&mut self) {
        self.events.push(ControlEvent::Activity);
    }

    // === Marker visuals ===

    pub fn thumb_pressed(&mut self, id: Uuid) {
        self.slider.thumb_pressed(id);
        self.process_slider_events(&[]);
    }

    pub fn thumb_released(&mut self, id: Uuid) {
        self.slider.thumb_released(id);
        self.process_slider_events(&[]);
    }

    pub fn thumb_drag_started(&mut self, id: Uuid) {
        self.slider.thumb_drag_started(id);
        self.process_slider_events(&[]);
    }

    pub fn thumb_drag_delta(&mut self, id: Uuid, dx: f64) {
        self.slider.thumb_drag_delta(id, dx);
        self.process_slider_events(&[]);
    }

    pub fn thumb_drag_completed(&mut self, id: Uuid, total_dx: f64, markers: &[MediaMarker]) {
        self.slider.thumb_drag_completed(id, total_dx);
        self.process_slider_events(markers);
    }

    pub fn range_drag_started(&mut self, id: Uuid) {
        self.slider.range_drag_started(id);
        self.process_slider_events(&[]);
    }

    pub fn range_drag_delta(&mut self, id: Uuid, grip: Grip, dx: f64) {
        self.slider.range_drag_delta(id, grip, dx);
        self.process_slider_events(&[]);
    }

    pub fn range_drag_completed(&mut self, id: Uuid, markers: &[MediaMarker]) {
        self.slider.range_drag_completed(id);
        self.process_slider_events(markers);
    }

    pub fn focus_marker(&mut self, id: Uuid) {
        self.slider.focus(id);
    }

    pub fn blur_marker(&mut self, id: Uuid) {
        self.slider.blur(id);
        self.process_slider_events(&[]);
    }

    pub fn edit_marker_description(&mut self, id: Uuid, description: &str) {
        self.slider.edit_description(id, description);
    }

    pub fn commit_marker_edit(&mut self, id: Uuid) {
        self.slider.commit_edit(id);
        self.process_slider_events(&[]);
    }

    pub fn cancel_marker_edit(&mut self, id: Uuid) {
        self.slider.cancel_edit(id);
        self.process_slider_events(&[]);
    }

    pub fn delete_marker(&mut self, id: Uuid) {
        self.slider.delete(id);
        self.process_slider_events(&[]);
    }

    fn process_slider_events(&mut self, markers: &[MediaMarker]) {
        for event in self.slider.take_events() {
            match event {
                SliderEvent::RangeSelectionChanged { id, start, end } => {
                    if self.state.selected_range_marker != Some(id) {
                        continue;
                    }
                    self.begin_selection_change();
                    let start = self.pixel_to_time(start);
                    let end = self.pixel_to_time(end);
                    self.set_selected_range(start, end);
                }
                SliderEvent::RangeSelectionCompleted { id, start, end } => {
                    if self.state.selected_range_marker == Some(id) {
                        self.state.changing_selection = false;
                        self.apply_selected_range();
                        if let Some(selection) = self.state.selection {
                            self.seek_position(selection.start);
                            self.resume_playing();
                        }
                    }

                    let Some(marker) = find_marker(markers, id) else {
                        continue;
                    };
                    let start_time = self.pixel_to_time(start);
                    let length = self.pixel_to_time(end).saturating_sub(start_time);
                    let unchanged = same_time(marker.start_time(), start_time)
                        && marker.length().is_some_and(|l| same_time(l, length));
                    if !unchanged {
                        self.events.push(ControlEvent::MarkerModified(Modification::retime(
                            id,
                            marker.description(),
                            start_time,
                            Some(length),
                        )));
                    }
                }
                SliderEvent::DragEnded { id, position } => {
                    let Some(marker) = find_marker(markers, id) else {
                        continue;
                    };
                    if marker.is_range() || self.element.duration() < marker.start_time() {
                        continue;
                    }
                    let start_time = self.pixel_to_time(position);
                    self.events.push(ControlEvent::MarkerModified(Modification::retime(
                        id,
                        marker.description(),
                        start_time,
                        None,
                    )));
                }
                SliderEvent::Modified(modification) => {
                    self.events.push(ControlEvent::MarkerModified(modification));
                    self.add_marker_toggle(true);
                }
                SliderEvent::EditorCancelled(_) => self.add_marker_toggle(true),
                SliderEvent::Selected(_)
                | SliderEvent::DragStarted(_)
                | SliderEvent::PositionChanged { .. } => {}
            }
        }
    }

    // === Clock ===

    /// Run playback, fast seeking and the delayed resume for `elapsed` host
    /// time.
    pub fn advance(&mut self, elapsed: Duration) {
        self.element.advance(elapsed);

        if self.fast_seek_timer.advance(elapsed) {
            if let Some(direction) = self.state.fast_seek {
                let step = TimeDelta::from_std(self.settings.fast_seek_step)
                    .unwrap_or_else(|_| TimeDelta::zero());
                let offset = match direction {
                    SeekDirection::Forward => step,
                    SeekDirection::Backward => -step,
                };
                self.seek_offset(offset);
            }
        }

        if let Some(remaining) = self.state.resume_countdown {
            if elapsed >= remaining {
                self.state.resume_countdown = None;
                if self.element.position() < self.element.duration() {
                    self.element.play();
                }
            } else {
                self.state.resume_countdown = Some(remaining - elapsed);
            }
        }

        self.forward_element_events();
    }

    fn forward_element_events(&mut self) {
        for event in self.element.take_events() {
            let event = match event {
                ElementEvent::MediaFailed(error) => ControlEvent::MediaFailed(error),
                other => ControlEvent::Playback(other),
            };
            self.events.push(event);
        }
    }

    // === Geometry ===

    pub fn time_to_pixel(&self, position: Duration) -> f64 {
        time_to_pixel(position, self.element.duration(), self.state.width)
    }

    pub fn pixel_to_time(&self, x: f64) -> Duration {
        pixel_to_time(x, self.element.duration(), self.state.width)
    }

    /// Pixel offset of the progress line.
    pub fn progress_pixel(&self) -> f64 {
        self.time_to_pixel(self.element.position())
    }

    /// Pixel span of the selection.
    pub fn selection_pixels(&self) -> Option<(f64, f64)> {
        self.state
            .selection
            .map(|s| (self.time_to_pixel(s.start), self.time_to_pixel(s.end)))
    }

    /// The selection region and progress line are drawn for audio only.
    pub fn shows_progress_overlay(&self) -> bool {
        !self.has_video()
    }

    /// Guide lines under the marker visuals; none over video.
    pub fn guide_lines(&self, markers: &[MediaMarker]) -> Vec<GuideLine> {
        if self.has_video() {
            return Vec::new();
        }
        marker_guide_lines(&self.slider, markers)
    }
}

/// Snap `selection` onto playable media.
///
/// A selection touching no segment is dropped. An edge in a gap moves to the
/// nearest segment boundary inside the selection: the end back to the end of
/// the last segment starting before it, the start forward to the next
/// segment's offset.
pub fn snap_selection(selection: Selection, segments: &PlayableSegments) -> Option<Selection> {
    let Selection {
        start: mut min,
        end: mut max,
    } = selection;
    let min_valid = segments.covers(min);
    let max_valid = segments.covers(max);

    if !min_valid && !max_valid && !segments.any_starting_within(min, max) {
        return None;
    }

    if !max_valid {
        if let Some(segment) = segments.last_starting_before(max) {
            max = segment.end();
        } else if let Some(segment) = segments.first_starting_after(max) {
            max = segment.offset();
        }
    }
    if !min_valid {
        if let Some(segment) = segments.first_starting_after(min) {
            min = segment.offset();
        }
    }

    Some(Selection::new(min.min(max), max))
}

fn same_time(a: Duration, b: Duration) -> bool {
    let delta = if a > b { a - b } else { b - a };
    delta < RETIME_TOLERANCE
}
