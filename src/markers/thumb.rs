//! Point marker visual.

use uuid::Uuid;

use super::editor::EditorState;
use super::events::{Modification, SliderEvent};

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerThumb {
    id: Uuid,
    /// Left edge in slider pixels.
    left: f64,
    display_name: String,
    description: String,
    is_frozen: bool,
    is_read_only: bool,
    is_system: bool,
    is_selected: bool,
    editor: EditorState,
}

impl MarkerThumb {
    pub fn new(
        id: Uuid,
        left: f64,
        display_name: impl Into<String>,
        description: impl Into<String>,
        is_frozen: bool,
        is_read_only: bool,
        is_system: bool,
    ) -> Self {
        Self {
            id,
            left,
            display_name: display_name.into(),
            description: description.into(),
            is_frozen,
            is_read_only,
            is_system,
            is_selected: false,
            editor: EditorState::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub(crate) fn set_left(&mut self, left: f64) {
        self.left = left;
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Live edit of the description while the editor is open.
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

    pub fn is_system(&self) -> bool {
        self.is_system
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

    /// Frozen and read-only thumbs do not move.
    pub fn can_drag(&self) -> bool {
        !self.is_read_only && !self.is_frozen
    }

    /// Returns true if the press selects the thumb.
    pub(crate) fn press(&self) -> bool {
        !self.is_read_only && !self.editor.is_dragging()
    }

    pub(crate) fn release(&mut self) {
        self.editor.release(&self.description);
    }

    pub(crate) fn focus(&mut self) {
        self.editor.focus(&self.description);
    }

    pub(crate) fn clear_editing(&mut self) {
        self.editor.hide();
    }

    pub(crate) fn drag_moved(&mut self) {
        self.editor.drag_moved();
    }

    pub(crate) fn drag_completed(&mut self) {
        self.editor.drag_completed();
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

#[cfg(test)]
mod tests {
    use super::*;

    fn thumb(read_only: bool) -> MarkerThumb {
        MarkerThumb::new(Uuid::new_v4(), 10.0, "Time Tag", "note", false, read_only, false)
    }

    #[test]
    fn commit_emits_modification_with_edited_description() {
        let mut thumb = thumb(false);
        let mut events = Vec::new();
        thumb.focus();
        thumb.set_description("edited");
        thumb.commit(&mut events);

        assert_eq!(
            events,
            vec![SliderEvent::Modified(Modification::describe(thumb.id(), "edited"))]
        );
        assert!(!thumb.editor().is_editing());
    }

    #[test]
    fn cancel_restores_description() {
        let mut thumb = thumb(false);
        let mut events = Vec::new();
        thumb.focus();
        thumb.set_description("typo");
        thumb.cancel(&mut events);

        assert_eq!(thumb.description(), "note");
        assert_eq!(events, vec![SliderEvent::EditorCancelled(thumb.id())]);
    }

    #[test]
    fn read_only_refuses_commit_and_delete() {
        let mut thumb = thumb(true);
        let mut events = Vec::new();
        thumb.focus();
        thumb.commit(&mut events);
        thumb.delete(&mut events);
        assert!(events.is_empty());
        assert!(!thumb.press());
        assert!(!thumb.can_drag());
    }

    #[test]
    fn delete_requests_removal_and_closes_editor() {
        let mut thumb = thumb(false);
        let mut events = Vec::new();
        thumb.focus();
        thumb.delete(&mut events);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0], SliderEvent::Modified(Modification::delete(thumb.id())));
        assert_eq!(events[1], SliderEvent::EditorCancelled(thumb.id()));
    }

    #[test]
    fn press_is_ignored_while_dragging() {
        let mut thumb = thumb(false);
        thumb.drag_moved();
        assert!(!thumb.press());
        thumb.drag_completed();
        assert!(thumb.press());
    }
}
