//! # Sequence Paths
//!
//! Mutations act on one ordered sequence at a time. A [`SequencePath`] names
//! that sequence by walking from the document root through container blocks:
//!
//! ```text
//! /                     top-level blocks
//! /cols[1]              second column of block `cols`
//! /cols[1]/grid[0]      children of block `grid` inside that column
//! ```

use crate::block::{Block, BlockId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One hop into a container: the block and which of its child sequences
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathStep {
    pub block: BlockId,
    pub slot: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequencePath(Vec<PathStep>);

impl SequencePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    /// Path to child sequence `slot` of `block`, which lives in this sequence
    pub fn child(&self, block: impl Into<BlockId>, slot: usize) -> Self {
        let mut steps = self.0.clone();
        steps.push(PathStep {
            block: block.into(),
            slot,
        });
        Self(steps)
    }

    fn push(&mut self, block: BlockId, slot: usize) {
        self.0.push(PathStep { block, slot });
    }

    fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for SequencePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for step in &self.0 {
            write!(f, "/{}[{}]", step.block, step.slot)?;
        }
        Ok(())
    }
}

/// Resolve a path to the sequence it names
pub fn sequence_at<'doc>(document: &'doc [Block], path: &SequencePath) -> Option<&'doc [Block]> {
    let mut current = document;
    for step in path.steps() {
        let block = current.iter().find(|b| b.id() == &step.block)?;
        current = block.child_sequence(step.slot)?.as_slice();
    }
    Some(current)
}

pub fn sequence_at_mut<'doc>(
    document: &'doc mut Vec<Block>,
    path: &SequencePath,
) -> Option<&'doc mut Vec<Block>> {
    let mut current = document;
    for step in path.steps() {
        let block = current.iter_mut().find(|b| b.id() == &step.block)?;
        current = block.child_sequence_mut(step.slot)?;
    }
    Some(current)
}

/// Path of the sequence directly holding `id`, and the block's index in it
pub fn locate(document: &[Block], id: &BlockId) -> Option<(SequencePath, usize)> {
    let mut path = SequencePath::root();
    let index = locate_in(document, id, &mut path)?;
    Some((path, index))
}

fn locate_in(blocks: &[Block], id: &BlockId, path: &mut SequencePath) -> Option<usize> {
    if let Some(index) = blocks.iter().position(|b| b.id() == id) {
        return Some(index);
    }

    for block in blocks {
        for (slot, sequence) in block.child_sequences().into_iter().enumerate() {
            path.push(block.id().clone(), slot);
            if let Some(index) = locate_in(sequence, id, path) {
                return Some(index);
            }
            path.pop();
        }
    }

    None
}
