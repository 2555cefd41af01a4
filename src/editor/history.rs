//! Undo history as a bounded snapshot stack.

use crate::document::Document;

/// Default depth bound for the undo stack.
const MAX_STEPS: usize = 100;

/// Undo/redo history over whole-document snapshots.
///
/// The document tree is small, so snapshots are cheaper and simpler than an
/// operation log. A new edit clears the redo stack; the undo stack is
/// bounded and evicts its oldest entry when full.
#[derive(Debug, Default)]
pub struct UndoHistory {
    undo_stack: Vec<Document>,
    redo_stack: Vec<Document>,
}

impl UndoHistory {
    /// Create an empty history.
    pub const fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Whether an undo step is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether a redo step is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Record the pre-edit state of the document. Clears the redo stack.
    pub fn record(&mut self, snapshot: Document) {
        self.redo_stack.clear();
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > MAX_STEPS {
            self.undo_stack.remove(0);
        }
    }

    /// Pop the most recent snapshot, storing `current` for redo.
    pub fn undo(&mut self, current: Document) -> Option<Document> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(snapshot)
    }

    /// Pop the most recent redo state, storing `current` for undo.
    pub fn redo(&mut self, current: Document) -> Option<Document> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(snapshot)
    }

    /// Drop all undo and redo state.
    ///
    /// Called after a programmatic overwrite so the user cannot undo into
    /// a state that never existed in the visible document.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, Inline};

    fn doc(text: &str) -> Document {
        Document::new(vec![Block::Paragraph(vec![Inline::plain(text)])])
    }

    #[test]
    fn test_empty_history_has_nothing_to_undo() {
        let mut history = UndoHistory::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo(doc("x")).is_none());
        assert!(history.redo(doc("x")).is_none());
    }

    #[test]
    fn test_record_then_undo_restores_snapshot() {
        let mut history = UndoHistory::new();
        history.record(doc("before"));
        let restored = history.undo(doc("after")).expect("undo");
        assert_eq!(restored, doc("before"));
        assert!(history.can_redo());
    }

    #[test]
    fn test_redo_restores_undone_state() {
        let mut history = UndoHistory::new();
        history.record(doc("v1"));
        let _ = history.undo(doc("v2")).expect("undo");
        let redone = history.redo(doc("v1")).expect("redo");
        assert_eq!(redone, doc("v2"));
        assert!(history.can_undo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut history = UndoHistory::new();
        history.record(doc("v1"));
        let _ = history.undo(doc("v2"));
        assert!(history.can_redo());
        history.record(doc("v1"));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_clear_empties_both_stacks() {
        let mut history = UndoHistory::new();
        history.record(doc("v1"));
        let _ = history.undo(doc("v2"));
        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut history = UndoHistory::new();
        for i in 0..150 {
            history.record(doc(&i.to_string()));
        }
        let mut undone = 0;
        while history.undo(doc("now")).is_some() {
            undone += 1;
        }
        assert_eq!(undone, 100, "oldest snapshots should be evicted");
    }
}
