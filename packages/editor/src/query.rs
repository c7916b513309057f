//! Read-only lookups over a block tree

use crate::block::{Block, BlockId};
use crate::visitor::{walk_block, Visitor};
use std::collections::HashSet;

struct IdCollector<'doc> {
    ids: Vec<&'doc BlockId>,
}

impl<'doc> Visitor<'doc> for IdCollector<'doc> {
    fn visit_block(&mut self, block: &'doc Block) {
        self.ids.push(block.id());
        walk_block(self, block);
    }
}

struct Finder<'doc, 'id> {
    target: &'id BlockId,
    found: Option<&'doc Block>,
}

impl<'doc> Visitor<'doc> for Finder<'doc, '_> {
    fn visit_block(&mut self, block: &'doc Block) {
        if self.found.is_some() {
            return;
        }
        if block.id() == self.target {
            self.found = Some(block);
            return;
        }
        walk_block(self, block);
    }
}

/// Every id in the tree, depth-first in document order
pub fn collect_ids(blocks: &[Block]) -> Vec<BlockId> {
    let mut collector = IdCollector { ids: Vec::new() };
    collector.visit_sequence(blocks);
    collector.ids.into_iter().cloned().collect()
}

/// Ids of `block` and everything nested inside it
pub fn subtree_ids(block: &Block) -> Vec<BlockId> {
    collect_ids(std::slice::from_ref(block))
}

/// Ids that occur more than once, each reported once in first-repeat order
pub fn duplicate_ids(blocks: &[Block]) -> Vec<BlockId> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for id in collect_ids(blocks) {
        if !seen.insert(id.clone()) && reported.insert(id.clone()) {
            duplicates.push(id);
        }
    }

    duplicates
}

/// Find a block anywhere in the tree
pub fn find<'doc>(blocks: &'doc [Block], id: &BlockId) -> Option<&'doc Block> {
    let mut finder = Finder {
        target: id,
        found: None,
    };
    finder.visit_sequence(blocks);
    finder.found
}

pub fn find_mut<'doc>(blocks: &'doc mut [Block], id: &BlockId) -> Option<&'doc mut Block> {
    for block in blocks {
        if block.id() == id {
            return Some(block);
        }
        for sequence in block.child_sequences_mut() {
            if let Some(found) = find_mut(sequence, id) {
                return Some(found);
            }
        }
    }
    None
}

pub fn contains(blocks: &[Block], id: &BlockId) -> bool {
    find(blocks, id).is_some()
}

/// Total number of blocks at every depth
pub fn count_blocks(blocks: &[Block]) -> usize {
    collect_ids(blocks).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Block> {
        vec![
            Block::heading("h", 1, "Title"),
            Block::columns(
                "cols",
                vec![
                    vec![Block::paragraph("left", "L")],
                    vec![Block::grid("g", vec![Block::image("img", "/x.png", "x")])],
                ],
            ),
            Block::paragraph("tail", "end"),
        ]
    }

    #[test]
    fn test_collect_ids_is_depth_first() {
        let ids: Vec<String> = collect_ids(&sample()).iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["h", "cols", "left", "g", "img", "tail"]);
    }

    #[test]
    fn test_find_nested() {
        let doc = sample();
        let found = find(&doc, &"img".into()).unwrap();
        assert_eq!(found.id(), &BlockId::from("img"));
        assert!(find(&doc, &"missing".into()).is_none());
        assert_eq!(count_blocks(&doc), 6);
    }

    #[test]
    fn test_find_mut_edits_in_place() {
        let mut doc = sample();
        if let Some(Block::Paragraph(p)) = find_mut(&mut doc, &"left".into()) {
            p.content = "changed".to_string();
        }

        match find(&doc, &"left".into()) {
            Some(Block::Paragraph(p)) => assert_eq!(p.content, "changed"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_ids() {
        let doc = vec![
            Block::paragraph("a", ""),
            Block::grid("g", vec![Block::paragraph("a", ""), Block::paragraph("a", "")]),
        ];
        assert_eq!(duplicate_ids(&doc), vec![BlockId::from("a")]);
        assert!(duplicate_ids(&sample()).is_empty());
    }
}
