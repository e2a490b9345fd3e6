use crate::edit::{Edit, Point, Replayable};

/// Refers to the edit created by [`History::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditHandle {
    index: usize,
}

impl EditHandle {
    /// Position of the edit in [`History::past`]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Undo/redo history of the drawing.
///
/// `past` holds committed edits oldest first, `future` holds undone edits with
/// the most recently undone last. The edit being dragged, if any, is the last
/// element of `past`.
///
/// Every mutating method returns `true` when the visible drawing may have
/// changed; the caller is responsible for redrawing.
#[derive(Debug, Default)]
pub struct History {
    past: Vec<Edit>,
    future: Vec<Edit>,
    active: bool,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new edit. Discards the redo branch.
    ///
    /// Returns `None` without changing anything if another edit is still active.
    pub fn begin(&mut self, edit: Edit) -> Option<EditHandle> {
        if self.active {
            log::debug!("Ignoring begin of a {} while an edit is active", edit.kind());
            return None;
        }

        self.past.push(edit);
        self.future.clear();
        self.active = true;
        Some(EditHandle {
            index: self.past.len() - 1,
        })
    }

    /// Forward a pointer position to the active edit
    pub fn extend(&mut self, point: Point) -> bool {
        match self.active_mut() {
            Some(edit) => {
                edit.extend(point);
                true
            }
            None => {
                log::warn!("extend called with no active edit");
                false
            }
        }
    }

    /// Freeze the active edit. No-op when nothing is active.
    pub fn end(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    pub fn undo(&mut self) -> bool {
        self.end();
        match self.past.pop() {
            Some(edit) => {
                self.future.push(edit);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.end();
        match self.future.pop() {
            Some(edit) => {
                self.past.push(edit);
                true
            }
            None => false,
        }
    }

    /// Drop both stacks. Not undoable.
    pub fn clear(&mut self) -> bool {
        self.end();
        self.past.clear();
        self.future.clear();
        true
    }

    pub fn past(&self) -> &[Edit] {
        &self.past
    }

    pub fn future(&self) -> &[Edit] {
        &self.future
    }

    pub fn get(&self, handle: EditHandle) -> Option<&Edit> {
        self.past.get(handle.index)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn active(&self) -> Option<&Edit> {
        if self.active { self.past.last() } else { None }
    }

    fn active_mut(&mut self) -> Option<&mut Edit> {
        if self.active { self.past.last_mut() } else { None }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::StrokeStyle;
    use egui::pos2;

    fn stroke_at(x: f32, y: f32) -> Edit {
        Edit::stroke(pos2(x, y), StrokeStyle::default())
    }

    #[test]
    fn test_begin_while_active_is_ignored() {
        let mut history = History::new();
        assert!(history.begin(stroke_at(0.0, 0.0)).is_some());
        assert!(history.begin(stroke_at(5.0, 5.0)).is_none());
        assert_eq!(history.past().len(), 1);
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut history = History::new();
        assert!(!history.end());
        history.begin(stroke_at(0.0, 0.0));
        assert!(history.end());
        assert!(!history.end());
        assert!(history.active().is_none());
    }

    #[test]
    fn test_extend_without_active_edit_is_noop() {
        let mut history = History::new();
        history.begin(stroke_at(0.0, 0.0));
        history.end();
        assert!(!history.extend(pos2(9.0, 9.0)));
        assert_eq!(history.past()[0].as_stroke().unwrap().points().len(), 1);
    }

    #[test]
    fn test_undo_ends_active_edit() {
        let mut history = History::new();
        history.begin(stroke_at(0.0, 0.0));
        assert!(history.undo());
        assert!(!history.is_active());
        assert!(!history.extend(pos2(1.0, 1.0)));
        assert_eq!(history.future()[0].as_stroke().unwrap().points().len(), 1);
    }

    #[test]
    fn test_handle_points_at_new_edit() {
        let mut history = History::new();
        history.begin(stroke_at(0.0, 0.0));
        history.end();
        let handle = history.begin(Edit::sticker(pos2(3.0, 4.0), "x")).unwrap();
        assert_eq!(handle.index(), 1);
        assert_eq!(history.get(handle).unwrap().kind(), "sticker");
    }
}
