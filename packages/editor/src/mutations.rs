//! # Block Mutations
//!
//! Structural edits on one ordered sequence of blocks.
//!
//! ## Sequence operations
//!
//! The free functions take a sequence by value and return the edited
//! sequence. They never fail: a missing id is a normal race (the block may
//! already have been deleted by another edit) and leaves the input unchanged.
//!
//! ### update_by_id
//! - Replaces the block with the matching id, keeping its position
//! - The replacement keeps the original id and must have the same variant
//! - Container shape is re-derived (`Columns` children follow `columnCount`)
//!
//! ### delete_by_id
//! - Removes the block and everything nested in it
//!
//! ### reorder
//! - Array move: the moved block takes the target's current index
//! - Both ids must be members of this exact sequence; moving between two
//!   containers is not supported and is left as a no-op
//!
//! ## Mutation
//!
//! [`Mutation`] addresses a sequence by [`SequencePath`] and validates before
//! applying, so callers that want to know why nothing happened get a
//! [`MutationError`] instead of a silent no-op.

use crate::block::{Block, BlockId, BlockKind, Document};
use crate::path::{locate, sequence_at, sequence_at_mut, SequencePath};
use crate::query::{collect_ids, duplicate_ids, subtree_ids};
use crate::validate::{validate, Violation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Replace the block with `id`, keeping its id and position
pub fn update_by_id(mut blocks: Vec<Block>, id: &BlockId, replacement: Block) -> Vec<Block> {
    if let Some(slot) = blocks.iter_mut().find(|b| b.id() == id) {
        if slot.kind() != replacement.kind() {
            tracing::debug!(%id, from = %slot.kind(), to = %replacement.kind(), "ignoring variant change");
            return blocks;
        }
        let mut replacement = replacement;
        replacement.set_id(id.clone());
        replacement.reshape();
        *slot = replacement;
    }
    blocks
}

/// Remove the block with `id`
pub fn delete_by_id(mut blocks: Vec<Block>, id: &BlockId) -> Vec<Block> {
    if let Some(index) = blocks.iter().position(|b| b.id() == id) {
        blocks.remove(index);
    }
    blocks
}

/// Move `moved` to the index currently held by `target`
pub fn reorder(mut blocks: Vec<Block>, moved: &BlockId, target: &BlockId) -> Vec<Block> {
    if moved == target {
        return blocks;
    }

    let from = blocks.iter().position(|b| b.id() == moved);
    let to = blocks.iter().position(|b| b.id() == target);

    if let (Some(from), Some(to)) = (from, to) {
        let block = blocks.remove(from);
        blocks.insert(to, block);
    }
    blocks
}

/// Insert at `index`, clamped to the sequence length
pub fn insert_at(mut blocks: Vec<Block>, index: usize, block: Block) -> Vec<Block> {
    let index = index.min(blocks.len());
    blocks.insert(index, block);
    blocks
}

pub fn append(mut blocks: Vec<Block>, block: Block) -> Vec<Block> {
    blocks.push(block);
    blocks
}

/// Structural edit addressed to one sequence of a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    /// Insert a new block (and its subtree) at `index`
    Insert {
        path: SequencePath,
        index: usize,
        block: Block,
    },

    /// Replace the fields of an existing block
    Update {
        path: SequencePath,
        id: BlockId,
        block: Block,
    },

    /// Remove a block and its subtree
    Delete { path: SequencePath, id: BlockId },

    /// Move a block onto a sibling's position
    Reorder {
        path: SequencePath,
        moved: BlockId,
        target: BlockId,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    NotFound(BlockId),

    #[error("Sequence not found: {0}")]
    SequenceNotFound(SequencePath),

    #[error("Cannot move {moved} onto {target}: blocks are in different containers")]
    CrossContainer { moved: BlockId, target: BlockId },

    #[error("Cannot change block {id} from {expected} to {found}")]
    VariantChange {
        id: BlockId,
        expected: BlockKind,
        found: BlockKind,
    },

    #[error("Duplicate block id: {0}")]
    DuplicateId(BlockId),

    #[error("Heading {id} has level {level}, expected 1-6")]
    HeadingLevel { id: BlockId, level: u8 },
}

impl Mutation {
    pub fn path(&self) -> &SequencePath {
        match self {
            Mutation::Insert { path, .. }
            | Mutation::Update { path, .. }
            | Mutation::Delete { path, .. }
            | Mutation::Reorder { path, .. } => path,
        }
    }

    /// Apply mutation to the document with validation
    ///
    /// Nothing is changed when validation fails.
    pub fn apply(&self, document: &mut Document) -> Result<(), MutationError> {
        self.validate(document)?;

        let sequence = sequence_at_mut(document, self.path())
            .ok_or_else(|| MutationError::SequenceNotFound(self.path().clone()))?;
        let current = std::mem::take(sequence);

        *sequence = match self {
            Mutation::Insert { index, block, .. } => insert_at(current, *index, block.clone()),
            Mutation::Update { id, block, .. } => update_by_id(current, id, block.clone()),
            Mutation::Delete { id, .. } => delete_by_id(current, id),
            Mutation::Reorder { moved, target, .. } => reorder(current, moved, target),
        };

        Ok(())
    }

    /// Validate without applying
    pub fn validate(&self, document: &[Block]) -> Result<(), MutationError> {
        let sequence = sequence_at(document, self.path())
            .ok_or_else(|| MutationError::SequenceNotFound(self.path().clone()))?;
        let position = |id: &BlockId| sequence.iter().position(|b| b.id() == id);

        match self {
            Mutation::Insert { block, .. } => {
                let existing: HashSet<BlockId> = collect_ids(document).into_iter().collect();
                check_new_ids(block, &existing)?;
                check_heading_levels(block)
            }

            Mutation::Update { id, block, .. } => {
                let index = position(id).ok_or_else(|| MutationError::NotFound(id.clone()))?;
                let current = &sequence[index];

                if current.kind() != block.kind() {
                    return Err(MutationError::VariantChange {
                        id: id.clone(),
                        expected: current.kind(),
                        found: block.kind(),
                    });
                }

                // Ids outside the replaced subtree must not reappear in the replacement.
                let mut outside: HashSet<BlockId> = collect_ids(document).into_iter().collect();
                for replaced in subtree_ids(current) {
                    outside.remove(&replaced);
                }
                let mut replacement = block.clone();
                replacement.set_id(id.clone());
                check_new_ids(&replacement, &outside)?;
                check_heading_levels(&replacement)
            }

            Mutation::Delete { id, .. } => {
                position(id).ok_or_else(|| MutationError::NotFound(id.clone()))?;
                Ok(())
            }

            Mutation::Reorder { moved, target, .. } => {
                if moved == target {
                    return Ok(());
                }
                if position(moved).is_some() && position(target).is_some() {
                    return Ok(());
                }

                let moved_at = locate(document, moved).ok_or_else(|| MutationError::NotFound(moved.clone()))?;
                let target_at = locate(document, target).ok_or_else(|| MutationError::NotFound(target.clone()))?;

                if moved_at.0 != target_at.0 {
                    tracing::debug!(%moved, %target, "rejecting cross-container reorder");
                    Err(MutationError::CrossContainer {
                        moved: moved.clone(),
                        target: target.clone(),
                    })
                } else {
                    // Siblings, but not in the addressed sequence.
                    Err(MutationError::NotFound(moved.clone()))
                }
            }
        }
    }
}

fn check_new_ids(block: &Block, existing: &HashSet<BlockId>) -> Result<(), MutationError> {
    let nested = std::slice::from_ref(block);
    if let Some(duplicate) = duplicate_ids(nested).into_iter().next() {
        return Err(MutationError::DuplicateId(duplicate));
    }
    match collect_ids(nested).into_iter().find(|id| existing.contains(id)) {
        Some(taken) => Err(MutationError::DuplicateId(taken)),
        None => Ok(()),
    }
}

fn check_heading_levels(block: &Block) -> Result<(), MutationError> {
    for violation in validate(std::slice::from_ref(block)) {
        if let Violation::HeadingLevel { id, level } = violation {
            return Err(MutationError::HeadingLevel { id, level });
        }
    }
    Ok(())
}
