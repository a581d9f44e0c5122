//! Range marker visual with left, right and center grips.
//!
//! The range is `(start, end)` in slider pixels. Grip drags are clamped so
//! that the range keeps at least `min_range` pixels and stays within
//! `[0, movable_width]`.

use thiserror::Error;
use uuid::Uuid;

use super::editor::EditorState;
use super::events::{Grip, Modification, SliderEvent};
use crate::time::{is_greater_than, is_zero};

/// Rejected range geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarkerError {
    #[error("Invalid range: start {start} and end {end} must not be negative")]
    NegativeRange { start: f64, end: f64 },

    #[error("Invalid range: start {start} plus minimum {min_range} exceeds end {end}")]
    RangeTooShort { start: f64, end: f64, min_range: f64 },

    #[error("Minimum range cannot be negative: {0}")]
    NegativeMinRange(f64),

    #[error("Marker range {start}..{end} is outside the movable width {width}")]
    OutOfBounds { start: f64, end: f64, width: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerRange {
    id: Uuid,
    start: f64,
    end: f64,
    min_range: f64,
    movable_width: f64,
    name: String,
    description: String,
    is_frozen: bool,
    is_read_only: bool,
    is_selected: bool,
    editor: EditorState,
}

impl MarkerRange {
    /// Create a range visual, validating the geometry.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        start: f64,
        end: f64,
        name: impl Into<String>,
        description: impl Into<String>,
        is_frozen: bool,
        is_read_only: bool,
        movable_width: f64,
    ) -> Result<Self, MarkerError> {
        let mut range = Self {
            id,
            start: 0.0,
            end: 0.0,
            min_range: 0.0,
            movable_width,
            name: name.into(),
            description: description.into(),
            is_frozen,
            is_read_only,
            is_selected: false,
            editor: EditorState::default(),
        };
        range.set_range(start, end)?;
        Ok(range)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// `(start, end)` in pixels.
    pub fn range(&self) -> (f64, f64) {
        (self.start, self.end)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Replace the range.
    ///
    /// The bounds check only applies once the slider has a width.
    pub fn set_range(&mut self, start: f64, end: f64) -> Result<(), MarkerError> {
        self.validate(start, end, self.min_range)?;
        self.start = start;
        self.end = end;
        Ok(())
    }

    fn validate(&self, start: f64, end: f64, min_range: f64) -> Result<(), MarkerError> {
        if start < 0.0 || end < 0.0 {
            return Err(MarkerError::NegativeRange { start, end });
        }
        if start + min_range > end {
            return Err(MarkerError::RangeTooShort {
                start,
                end,
                min_range,
            });
        }
        let width = self.movable_width;
        if !width.is_nan()
            && !is_zero(width)
            && (is_greater_than(end, width) || is_greater_than(start, width))
        {
            return Err(MarkerError::OutOfBounds { start, end, width });
        }
        Ok(())
    }

    pub fn min_range(&self) -> f64 {
        self.min_range
    }

    pub fn set_min_range(&mut self, min_range: f64) -> Result<(), MarkerError> {
        if min_range < 0.0 {
            return Err(MarkerError::NegativeMinRange(min_range));
        }
        self.validate(self.start, self.end, min_range)?;
        self.min_range = min_range;
        Ok(())
    }

    pub fn movable_width(&self) -> f64 {
        self.movable_width
    }

    pub(crate) fn set_movable_width(&mut self, width: f64) {
        self.movable_width = width;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn is_frozen(&self) -> bool {
        self.is_frozen
    }

    pub(crate) fn set_frozen(&mut self, frozen: bool) {
        self.is_frozen = frozen;
    }

    pub fn is_read_only(&self) -> bool {
        self.is_read_only
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.is_selected = selected;
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn can_drag(&self) -> bool {
        !self.is_read_only && !self.is_frozen
    }

    /// A grip was pressed. Returns true if the range should become selected.
    pub(crate) fn drag_started(&self) -> bool {
        !self.is_read_only && !self.editor.is_dragging()
    }

    /// Move `grip` by `dx` pixels, clamped to the available room.
    pub(crate) fn drag_delta(&mut self, grip: Grip, dx: f64, events: &mut Vec<SliderEvent>) {
        if !self.can_drag() {
            return;
        }
        self.editor.drag_moved();

        match grip {
            Grip::Left => {
                let room_right = (self.end - self.min_range) - self.start;
                let room_left = self.start;
                let step = clamp_move(room_left, room_right, dx);
                self.start += step;
                if self.end - self.start < self.min_range {
                    self.start = self.end - self.min_range;
                }
            }
            Grip::Right => {
                let room_right = self.movable_width - self.end;
                let room_left = self.width() - self.min_range;
                let step = clamp_move(room_left, room_right, dx);
                self.end = (self.end + step).max(self.start + self.min_range);
            }
            Grip::Center => {
                let room_left = self.start;
                let room_right = self.movable_width - self.end;
                let step = clamp_move(room_left, room_right, dx);
                self.start += step;
                self.end += step;
            }
        }

        events.push(SliderEvent::RangeSelectionChanged {
            id: self.id,
            start: self.start,
            end: self.end,
        });
    }

    /// A grip was released. Handles the click, restores an editor hidden by
    /// the drag and reports the final range.
    pub(crate) fn drag_completed(&mut self, events: &mut Vec<SliderEvent>) {
        self.release();
        self.editor.drag_completed();
        events.push(SliderEvent::RangeSelectionCompleted {
            id: self.id,
            start: self.start,
            end: self.end,
        });
    }

    pub(crate) fn release(&mut self) {
        if self.is_read_only {
            return;
        }
        self.editor.release(&self.description);
    }

    pub(crate) fn focus(&mut self) {
        self.editor.focus(&self.description);
    }

    pub(crate) fn clear_editing(&mut self) {
        self.editor.hide();
    }

    pub(crate) fn commit(&mut self, events: &mut Vec<SliderEvent>) {
        if self.is_read_only {
            return;
        }
        self.editor.commit(&self.description);
        events.push(SliderEvent::Modified(Modification::describe(
            self.id,
            self.description.clone(),
        )));
    }

    pub(crate) fn delete(&mut self, events: &mut Vec<SliderEvent>) {
        if self.is_read_only {
            return;
        }
        events.push(SliderEvent::Modified(Modification::delete(self.id)));
        self.cancel(events);
    }

    pub(crate) fn cancel(&mut self, events: &mut Vec<SliderEvent>) {
        if let Some(previous) = self.editor.cancel() {
            self.description = previous;
            events.push(SliderEvent::EditorCancelled(self.id));
        }
    }

    pub(crate) fn blur(&mut self, events: &mut Vec<SliderEvent>) {
        if let Some(previous) = self.editor.blur() {
            self.description = previous;
            events.push(SliderEvent::EditorCancelled(self.id));
        }
    }
}

/// Clamp a requested move to the room on its side.
fn clamp_move(room_left: f64, room_right: f64, requested: f64) -> f64 {
    if requested > 0.0 && is_greater_than(requested, room_right) {
        room_right.max(0.0)
    } else if requested < 0.0 && is_greater_than(requested.abs(), room_left) {
        -room_left.max(0.0)
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: f64, end: f64) -> MarkerRange {
        MarkerRange::new(Uuid::new_v4(), start, end, "Section Tag", "", false, false, 100.0)
            .unwrap()
    }

    fn drag(range: &mut MarkerRange, grip: Grip, dx: f64) -> Vec<SliderEvent> {
        let mut events = Vec::new();
        range.drag_delta(grip, dx, &mut events);
        events
    }

    #[test]
    fn rejects_invalid_geometry() {
        let id = Uuid::new_v4();
        assert!(matches!(
            MarkerRange::new(id, -1.0, 5.0, "", "", false, false, 0.0),
            Err(MarkerError::NegativeRange { .. })
        ));
        assert!(matches!(
            MarkerRange::new(id, 6.0, 5.0, "", "", false, false, 0.0),
            Err(MarkerError::RangeTooShort { .. })
        ));
        assert!(matches!(
            MarkerRange::new(id, 10.0, 120.0, "", "", false, false, 100.0),
            Err(MarkerError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn bounds_are_not_checked_without_width() {
        assert!(MarkerRange::new(Uuid::new_v4(), 10.0, 500.0, "", "", false, false, 0.0).is_ok());
    }

    #[test]
    fn min_range_must_not_be_negative_or_break_the_range() {
        let mut range = range(10.0, 20.0);
        assert_eq!(
            range.set_min_range(-1.0),
            Err(MarkerError::NegativeMinRange(-1.0))
        );
        assert!(range.set_min_range(15.0).is_err());
        assert!(range.set_min_range(5.0).is_ok());
        assert!(range.set_range(10.0, 12.0).is_err());
    }

    #[test]
    fn left_grip_stops_at_min_range() {
        let mut range = range(10.0, 30.0);
        range.set_min_range(5.0).unwrap();
        let events = drag(&mut range, Grip::Left, 50.0);
        assert_eq!(range.range(), (25.0, 30.0));
        assert_eq!(
            events,
            vec![SliderEvent::RangeSelectionChanged {
                id: range.id(),
                start: 25.0,
                end: 30.0
            }]
        );
    }

    #[test]
    fn left_grip_stops_at_zero() {
        let mut range = range(10.0, 30.0);
        drag(&mut range, Grip::Left, -50.0);
        assert_eq!(range.range(), (0.0, 30.0));
    }

    #[test]
    fn right_grip_stops_at_width_and_min_range() {
        let mut range = range(10.0, 30.0);
        drag(&mut range, Grip::Right, 500.0);
        assert_eq!(range.range(), (10.0, 100.0));

        range.set_min_range(10.0).unwrap();
        drag(&mut range, Grip::Right, -500.0);
        assert_eq!(range.range(), (10.0, 20.0));
    }

    #[test]
    fn center_grip_moves_both_edges_within_room() {
        let mut range = range(10.0, 30.0);
        drag(&mut range, Grip::Center, 25.0);
        assert_eq!(range.range(), (35.0, 55.0));

        drag(&mut range, Grip::Center, 100.0);
        assert_eq!(range.range(), (80.0, 100.0));

        drag(&mut range, Grip::Center, -200.0);
        assert_eq!(range.range(), (0.0, 20.0));
    }

    #[test]
    fn frozen_and_read_only_ranges_do_not_move() {
        let mut frozen =
            MarkerRange::new(Uuid::new_v4(), 10.0, 30.0, "", "", true, false, 100.0).unwrap();
        assert!(drag(&mut frozen, Grip::Center, 5.0).is_empty());

        let mut read_only =
            MarkerRange::new(Uuid::new_v4(), 10.0, 30.0, "", "", false, true, 100.0).unwrap();
        assert!(drag(&mut read_only, Grip::Left, 5.0).is_empty());
        assert!(!read_only.drag_started());
        assert_eq!(read_only.range(), (10.0, 30.0));
    }

    #[test]
    fn drag_completion_restores_editor_and_reports_range() {
        let mut range = range(10.0, 30.0);
        range.focus();
        drag(&mut range, Grip::Center, 5.0);
        assert!(!range.editor().is_editing());

        let mut events = Vec::new();
        range.drag_completed(&mut events);
        assert!(range.editor().is_editing());
        assert!(!range.editor().is_dragging());
        assert_eq!(
            events,
            vec![SliderEvent::RangeSelectionCompleted {
                id: range.id(),
                start: 15.0,
                end: 35.0
            }]
        );
    }

    #[test]
    fn click_without_drag_focuses_range() {
        let mut range = range(10.0, 30.0);
        let mut events = Vec::new();
        range.drag_completed(&mut events);
        assert!(range.editor().is_focused());
        assert!(range.editor().is_editing());
    }

    #[test]
    fn cancel_only_reports_when_editor_was_open() {
        let mut range = range(10.0, 30.0);
        let mut events = Vec::new();
        range.cancel(&mut events);
        assert!(events.is_empty());

        range.focus();
        range.set_description("draft");
        range.blur(&mut events);
        assert_eq!(events, vec![SliderEvent::EditorCancelled(range.id())]);
        assert_eq!(range.description(), "");
    }
}
