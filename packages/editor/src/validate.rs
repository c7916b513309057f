//! Invariant checks for block trees

use crate::block::{Block, BlockId};
use crate::query::duplicate_ids;
use crate::visitor::{walk_block, walk_block_mut, Visitor, VisitorMut};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("Block id {0} is used more than once")]
    DuplicateId(BlockId),

    #[error("Columns block {id} declares {column_count} columns but has {actual}")]
    ColumnArity {
        id: BlockId,
        column_count: usize,
        actual: usize,
    },

    #[error("Heading {id} has level {level}, expected 1-6")]
    HeadingLevel { id: BlockId, level: u8 },
}

struct ShapeChecker {
    violations: Vec<Violation>,
}

impl<'doc> Visitor<'doc> for ShapeChecker {
    fn visit_block(&mut self, block: &'doc Block) {
        match block {
            Block::Columns(c) if c.children.len() != c.column_count => {
                self.violations.push(Violation::ColumnArity {
                    id: c.id.clone(),
                    column_count: c.column_count,
                    actual: c.children.len(),
                });
            }
            Block::Heading(h) if !(1..=6).contains(&h.level) => {
                self.violations.push(Violation::HeadingLevel {
                    id: h.id.clone(),
                    level: h.level,
                });
            }
            _ => {}
        }
        walk_block(self, block);
    }
}

/// Every invariant violation in the tree
pub fn validate(blocks: &[Block]) -> Vec<Violation> {
    let mut violations: Vec<Violation> = duplicate_ids(blocks)
        .into_iter()
        .map(Violation::DuplicateId)
        .collect();

    let mut checker = ShapeChecker {
        violations: Vec::new(),
    };
    checker.visit_sequence(blocks);
    violations.extend(checker.violations);

    violations
}

struct Repair {
    fixed: usize,
}

impl VisitorMut for Repair {
    fn visit_block_mut(&mut self, block: &mut Block) {
        match block {
            Block::Columns(c) if c.children.len() != c.column_count || c.column_count == 0 => {
                let count = c.column_count;
                c.set_column_count(count);
                self.fixed += 1;
            }
            Block::Heading(h) if !(1..=6).contains(&h.level) => {
                h.level = h.level.clamp(1, 6);
                self.fixed += 1;
            }
            _ => {}
        }
        walk_block_mut(self, block);
    }
}

/// Fix shape violations in place: resize columns to their declared count and
/// clamp heading levels. Duplicate ids are left for the caller. Returns the
/// number of blocks changed.
pub fn repair(blocks: &mut Vec<Block>) -> usize {
    let mut repair = Repair { fixed: 0 };
    repair.visit_sequence_mut(blocks);
    repair.fixed
}
