//! Marker visuals over the timeline.
//!
//! [`MultiThumbSlider`] owns one visual per visible marker: a
//! [`MarkerThumb`] for point markers and a [`MarkerRange`] for range markers,
//! keyed by marker id. It keeps their stacking order, selection and freeze
//! state, and turns pointer interaction into [`SliderEvent`]s drained with
//! [`MultiThumbSlider::take_events`].
//!
//! Z-order values always form the dense sequence `1..=N` over all visuals.

use std::collections::HashMap;

use tracing::trace;
use uuid::Uuid;

use super::events::{Grip, SliderEvent};
use super::range::{MarkerError, MarkerRange};
use super::thumb::MarkerThumb;

#[derive(Debug, Default)]
pub struct MultiThumbSlider {
    width: f64,
    height: f64,
    thumbs: HashMap<Uuid, MarkerThumb>,
    ranges: HashMap<Uuid, MarkerRange>,
    z_order: HashMap<Uuid, usize>,
    events: Vec<SliderEvent>,
}

impl MultiThumbSlider {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    // === Accessors ===

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn thumbs(&self) -> &HashMap<Uuid, MarkerThumb> {
        &self.thumbs
    }

    pub fn ranges(&self) -> &HashMap<Uuid, MarkerRange> {
        &self.ranges
    }

    pub fn thumb(&self, id: Uuid) -> Option<&MarkerThumb> {
        self.thumbs.get(&id)
    }

    pub fn range(&self, id: Uuid) -> Option<&MarkerRange> {
        self.ranges.get(&id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.z_order.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.z_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    pub fn z_order(&self) -> &HashMap<Uuid, usize> {
        &self.z_order
    }

    pub fn z_index(&self, id: Uuid) -> Option<usize> {
        self.z_order.get(&id).copied()
    }

    /// Ids from back to front.
    pub fn order(&self) -> Vec<Uuid> {
        let mut ids: Vec<(Uuid, usize)> = self.z_order.iter().map(|(id, z)| (*id, *z)).collect();
        ids.sort_by_key(|(_, z)| *z);
        ids.into_iter().map(|(id, _)| id).collect()
    }

    /// The selected visual, if any.
    pub fn selected(&self) -> Option<Uuid> {
        self.thumbs
            .values()
            .find(|t| t.is_selected())
            .map(MarkerThumb::id)
            .or_else(|| self.ranges.values().find(|r| r.is_selected()).map(MarkerRange::id))
    }

    /// Drain pending notifications.
    pub fn take_events(&mut self) -> Vec<SliderEvent> {
        std::mem::take(&mut self.events)
    }

    // === Collection ===

    /// Add or replace the point visual for `id`.
    #[allow(clippy::too_many_arguments)]
    pub fn add_thumb(
        &mut self,
        id: Uuid,
        left: f64,
        display_name: &str,
        description: &str,
        is_frozen: bool,
        is_read_only: bool,
        is_system: bool,
    ) -> &MarkerThumb {
        self.ranges.remove(&id);
        self.push_z(id);
        let thumb = MarkerThumb::new(
            id,
            left,
            display_name,
            description,
            is_frozen,
            is_read_only,
            is_system,
        );
        self.thumbs.insert(id, thumb);
        &self.thumbs[&id]
    }

    /// Add or replace the range visual for `id`.
    ///
    /// An invalid range leaves the slider untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn add_range(
        &mut self,
        id: Uuid,
        start: f64,
        end: f64,
        name: &str,
        description: &str,
        is_frozen: bool,
        is_read_only: bool,
    ) -> Result<&MarkerRange, MarkerError> {
        let range = MarkerRange::new(
            id,
            start,
            end,
            name,
            description,
            is_frozen,
            is_read_only,
            self.width,
        )?;
        self.thumbs.remove(&id);
        self.push_z(id);
        self.ranges.insert(id, range);
        Ok(&self.ranges[&id])
    }

    fn push_z(&mut self, id: Uuid) {
        if !self.z_order.contains_key(&id) {
            let next = self.z_order.len() + 1;
            self.z_order.insert(id, next);
        }
    }

    /// Remove the visual for `id`, closing the gap it leaves in the z-order.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let removed = self.thumbs.remove(&id).is_some() | self.ranges.remove(&id).is_some();
        if let Some(z) = self.z_order.remove(&id) {
            for value in self.z_order.values_mut() {
                if *value > z {
                    *value -= 1;
                }
            }
        }
        removed
    }

    pub fn clear(&mut self) {
        self.thumbs.clear();
        self.ranges.clear();
        self.z_order.clear();
    }

    /// Raise `id` to the top and select it.
    pub fn bring_to_front(&mut self, id: Uuid) {
        self.raise(id);
        self.select(id);
    }

    /// Swap `id` with the topmost visual.
    fn raise(&mut self, id: Uuid) {
        let Some(current) = self.z_index(id) else {
            return;
        };
        let top = self
            .z_order
            .iter()
            .max_by_key(|(_, z)| **z)
            .map(|(other, z)| (*other, *z));
        if let Some((top_id, top_z)) = top {
            if top_id != id {
                trace!(%id, from = current, to = top_z, "raising marker");
                self.z_order.insert(top_id, current);
                self.z_order.insert(id, top_z);
            }
        }
    }

    /// Select `id`, deselecting every other visual.
    pub fn select(&mut self, id: Uuid) {
        for thumb in self.thumbs.values_mut() {
            thumb.set_selected(false);
        }
        for range in self.ranges.values_mut() {
            range.set_selected(false);
        }
        if let Some(thumb) = self.thumbs.get_mut(&id) {
            thumb.set_selected(true);
        } else if let Some(range) = self.ranges.get_mut(&id) {
            range.set_selected(true);
        }
    }

    /// Re-layout a visual. Ranges are clamped to the slider width.
    pub fn update(
        &mut self,
        id: Uuid,
        start: f64,
        end: f64,
        description: &str,
    ) -> Result<(), MarkerError> {
        if let Some(range) = self.ranges.get_mut(&id) {
            let start = start.max(0.0);
            let end = if range.movable_width() > 0.0 {
                end.min(range.movable_width())
            } else {
                end
            };
            range.set_range(start, end)?;
            range.set_description(description);
        } else if let Some(thumb) = self.thumbs.get_mut(&id) {
            thumb.set_left(start);
            thumb.set_description(description);
        }
        Ok(())
    }

    pub fn freeze(&mut self, id: Uuid, frozen: bool) {
        if let Some(thumb) = self.thumbs.get_mut(&id) {
            thumb.set_frozen(frozen);
        } else if let Some(range) = self.ranges.get_mut(&id) {
            range.set_frozen(frozen);
        }
    }

    /// Open the editor of `id`, closing other editors of the same kind.
    pub fn show_edit(&mut self, id: Uuid) {
        if self.thumbs.contains_key(&id) {
            for thumb in self.thumbs.values_mut() {
                thumb.clear_editing();
            }
            if let Some(thumb) = self.thumbs.get_mut(&id) {
                thumb.focus();
            }
        } else if self.ranges.contains_key(&id) {
            for range in self.ranges.values_mut() {
                range.clear_editing();
            }
            if let Some(range) = self.ranges.get_mut(&id) {
                range.focus();
            }
        }
    }

    /// New slider size. Every range may move within the new width.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        for range in self.ranges.values_mut() {
            range.set_movable_width(width);
        }
    }

    // === Point marker interaction ===

    pub fn thumb_pressed(&mut self, id: Uuid) {
        if self.thumbs.get(&id).is_some_and(MarkerThumb::press) {
            self.select(id);
            self.events.push(SliderEvent::Selected(id));
        }
    }

    pub fn thumb_released(&mut self, id: Uuid) {
        if let Some(thumb) = self.thumbs.get_mut(&id) {
            thumb.release();
        }
    }

    pub fn thumb_drag_started(&mut self, id: Uuid) {
        if !self.thumbs.get(&id).is_some_and(MarkerThumb::can_drag) {
            return;
        }
        self.raise(id);
        self.events.push(SliderEvent::DragStarted(id));
    }

    pub fn thumb_drag_delta(&mut self, id: Uuid, dx: f64) {
        let width = self.width;
        let Some(thumb) = self.thumbs.get_mut(&id) else {
            return;
        };
        if !thumb.can_drag() {
            return;
        }
        thumb.drag_moved();
        thumb.set_left((thumb.left() + dx).clamp(0.0, width.max(0.0)));
        self.events
            .push(SliderEvent::PositionChanged { id, delta: dx });
    }

    /// Finish a point drag. `total_dx` is the net movement of the drag.
    pub fn thumb_drag_completed(&mut self, id: Uuid, total_dx: f64) {
        let Some(thumb) = self.thumbs.get_mut(&id) else {
            return;
        };
        thumb.drag_completed();
        if !thumb.can_drag() || total_dx == 0.0 {
            return;
        }
        let position = thumb.left();
        self.events.push(SliderEvent::DragEnded { id, position });
    }

    // === Range marker interaction ===

    pub fn range_drag_started(&mut self, id: Uuid) {
        if self.ranges.get(&id).is_some_and(MarkerRange::drag_started) {
            self.select(id);
            self.events.push(SliderEvent::Selected(id));
        }
    }

    pub fn range_drag_delta(&mut self, id: Uuid, grip: Grip, dx: f64) {
        if let Some(range) = self.ranges.get_mut(&id) {
            range.drag_delta(grip, dx, &mut self.events);
        }
    }

    pub fn range_drag_completed(&mut self, id: Uuid) {
        if let Some(range) = self.ranges.get_mut(&id) {
            range.drag_completed(&mut self.events);
        }
    }

    // === Editing ===

    pub fn focus(&mut self, id: Uuid) {
        if let Some(thumb) = self.thumbs.get_mut(&id) {
            thumb.focus();
        } else if let Some(range) = self.ranges.get_mut(&id) {
            range.focus();
        }
    }

    pub fn blur(&mut self, id: Uuid) {
        if let Some(thumb) = self.thumbs.get_mut(&id) {
            thumb.blur(&mut self.events);
        } else if let Some(range) = self.ranges.get_mut(&id) {
            range.blur(&mut self.events);
        }
    }

    /// Text typed into the open editor.
    pub fn edit_description(&mut self, id: Uuid, description: &str) {
        if let Some(thumb) = self.thumbs.get_mut(&id) {
            thumb.set_description(description);
        } else if let Some(range) = self.ranges.get_mut(&id) {
            range.set_description(description);
        }
    }

    pub fn commit_edit(&mut self, id: Uuid) {
        if let Some(thumb) = self.thumbs.get_mut(&id) {
            thumb.commit(&mut self.events);
        } else if let Some(range) = self.ranges.get_mut(&id) {
            range.commit(&mut self.events);
        }
    }

    pub fn cancel_edit(&mut self, id: Uuid) {
        if let Some(thumb) = self.thumbs.get_mut(&id) {
            thumb.cancel(&mut self.events);
        } else if let Some(range) = self.ranges.get_mut(&id) {
            range.cancel(&mut self.events);
        }
    }

    pub fn delete(&mut self, id: Uuid) {
        if let Some(thumb) = self.thumbs.get_mut(&id) {
            thumb.delete(&mut self.events);
        } else if let Some(range) = self.ranges.get_mut(&id) {
            range.delete(&mut self.events);
        }
    }
}
