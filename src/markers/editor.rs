//! Edit popover and drag state shared by point and range visuals.
//!
//! Two independent machines live here: `Idle -> Dragging -> Idle` and
//! `Collapsed -> Editing -> Collapsed`. A drag hides an open editor and
//! brings it back once the drag completes.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    is_focused: bool,
    is_editing: bool,
    is_dragging: bool,
    was_editing_open: bool,
    /// Description when the editor was opened; restored on cancel.
    previous_description: String,
}

impl EditorState {
    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Focus the visual and open its editor.
    pub fn focus(&mut self, description: &str) {
        self.is_focused = true;
        self.open(description);
    }

    pub fn open(&mut self, description: &str) {
        self.previous_description = description.to_string();
        self.is_editing = true;
    }

    pub fn hide(&mut self) {
        self.is_editing = false;
    }

    /// A release on the visual. Focused visuals toggle their editor; others
    /// take focus.
    pub fn release(&mut self, description: &str) {
        if self.is_dragging {
            return;
        }
        if !self.is_focused {
            self.focus(description);
        } else if self.is_editing {
            self.hide();
        } else {
            self.open(description);
        }
    }

    /// Called for every drag delta; only the first one changes state.
    pub fn drag_moved(&mut self) {
        if self.is_dragging {
            return;
        }
        self.was_editing_open = self.is_editing;
        self.is_editing = false;
        self.is_dragging = true;
    }

    pub fn drag_completed(&mut self) {
        self.is_dragging = false;
        if self.was_editing_open {
            self.is_editing = true;
        }
        self.was_editing_open = false;
    }

    /// Accept `description` as the new baseline and close the editor.
    pub fn commit(&mut self, description: &str) {
        self.previous_description = description.to_string();
        self.is_editing = false;
    }

    /// Close the editor, returning the description to restore. `None` if the
    /// editor was not open.
    pub fn cancel(&mut self) -> Option<String> {
        if !self.is_editing {
            return None;
        }
        self.is_editing = false;
        Some(self.previous_description.clone())
    }

    /// Focus moved elsewhere.
    pub fn blur(&mut self) -> Option<String> {
        self.is_focused = false;
        self.cancel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_focuses_then_toggles() {
        let mut editor = EditorState::default();
        editor.release("a");
        assert!(editor.is_focused());
        assert!(editor.is_editing());

        editor.release("a");
        assert!(!editor.is_editing());

        editor.release("a");
        assert!(editor.is_editing());
    }

    #[test]
    fn drag_hides_and_restores_open_editor() {
        let mut editor = EditorState::default();
        editor.focus("a");

        editor.drag_moved();
        editor.drag_moved();
        assert!(editor.is_dragging());
        assert!(!editor.is_editing());

        editor.drag_completed();
        assert!(!editor.is_dragging());
        assert!(editor.is_editing());
    }

    #[test]
    fn drag_does_not_open_closed_editor() {
        let mut editor = EditorState::default();
        editor.drag_moved();
        editor.drag_completed();
        assert!(!editor.is_editing());
    }

    #[test]
    fn cancel_restores_snapshot() {
        let mut editor = EditorState::default();
        editor.focus("before");
        assert_eq!(editor.cancel(), Some("before".to_string()));
        assert_eq!(editor.cancel(), None);
    }

    #[test]
    fn commit_moves_snapshot() {
        let mut editor = EditorState::default();
        editor.focus("before");
        editor.commit("after");
        assert!(!editor.is_editing());

        editor.open("after");
        assert_eq!(editor.blur(), Some("after".to_string()));
        assert!(!editor.is_focused());
    }
}
