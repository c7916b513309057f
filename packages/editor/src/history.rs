//! # Edit History
//!
//! Undo/redo over whole-document snapshots.
//!
//! ## Design
//!
//! - Every applied mutation records the document as it was before
//! - Undo swaps the current document with the last snapshot
//! - Redo swaps it back
//! - A new edit clears the redo stack
//! - Depth is bounded (oldest snapshots are dropped first)

use crate::block::Document;
use crate::mutations::{Mutation, MutationError};

pub const DEFAULT_MAX_LEVELS: usize = 100;

#[derive(Debug)]
pub struct History {
    undo_stack: Vec<Document>,
    redo_stack: Vec<Document>,
    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_MAX_LEVELS)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Apply a mutation and record the previous state for undo.
    ///
    /// A rejected mutation records nothing.
    pub fn apply(&mut self, mutation: &Mutation, document: &mut Document) -> Result<(), MutationError> {
        let before = document.clone();
        mutation.apply(document)?;
        self.commit(before);
        Ok(())
    }

    /// Record a snapshot taken before an edit made outside [`History::apply`]
    pub fn commit(&mut self, before: Document) {
        self.undo_stack.push(before);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    pub fn undo(&mut self, document: &mut Document) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                let current = std::mem::replace(document, previous);
                self.redo_stack.push(current);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self, document: &mut Document) -> bool {
        match self.redo_stack.pop() {
            Some(next) => {
                let current = std::mem::replace(document, next);
                self.undo_stack.push(current);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::path::SequencePath;

    fn delete(id: &str) -> Mutation {
        Mutation::Delete {
            path: SequencePath::root(),
            id: id.into(),
        }
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let original = vec![Block::paragraph("a", "A"), Block::paragraph("b", "B")];
        let mut doc = original.clone();
        let mut history = History::new();

        history.apply(&delete("a"), &mut doc).unwrap();
        assert_eq!(doc.len(), 1);

        assert!(history.undo(&mut doc));
        assert_eq!(doc, original);

        assert!(history.redo(&mut doc));
        assert_eq!(doc.len(), 1);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_failed_mutation_is_not_recorded() {
        let mut doc = vec![Block::paragraph("a", "A")];
        let mut history = History::new();

        assert!(history.apply(&delete("zz"), &mut doc).is_err());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_new_edit_clears_redo_and_depth_is_bounded() {
        let mut doc: Document = (0..5).map(|i| Block::paragraph(format!("p{}", i), "")).collect();
        let mut history = History::with_max_levels(2);

        history.apply(&delete("p0"), &mut doc).unwrap();
        history.apply(&delete("p1"), &mut doc).unwrap();
        history.apply(&delete("p2"), &mut doc).unwrap();
        assert_eq!(history.undo_count(), 2);

        history.undo(&mut doc);
        assert!(history.can_redo());
        history.apply(&delete("p3"), &mut doc).unwrap();
        assert!(!history.can_redo());
    }
}
