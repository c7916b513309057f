use crate::block::Block;

/// Visitor pattern for traversing block trees immutably
///
/// The default implementations walk the entire tree through the
/// child-sequence capability. Override a `visit_*` method to act on nodes and
/// call the matching `walk_*` function to keep descending.
pub trait Visitor<'doc>: Sized {
    fn visit_sequence(&mut self, blocks: &'doc [Block]) {
        walk_sequence(self, blocks);
    }

    fn visit_block(&mut self, block: &'doc Block) {
        walk_block(self, block);
    }
}

/// Mutable visitor pattern for transforming block trees
pub trait VisitorMut: Sized {
    fn visit_sequence_mut(&mut self, blocks: &mut Vec<Block>) {
        walk_sequence_mut(self, blocks);
    }

    fn visit_block_mut(&mut self, block: &mut Block) {
        walk_block_mut(self, block);
    }
}

pub fn walk_sequence<'doc, V: Visitor<'doc>>(visitor: &mut V, blocks: &'doc [Block]) {
    for block in blocks {
        visitor.visit_block(block);
    }
}

pub fn walk_block<'doc, V: Visitor<'doc>>(visitor: &mut V, block: &'doc Block) {
    for sequence in block.child_sequences() {
        visitor.visit_sequence(sequence);
    }
}

pub fn walk_sequence_mut<V: VisitorMut>(visitor: &mut V, blocks: &mut Vec<Block>) {
    for block in blocks.iter_mut() {
        visitor.visit_block_mut(block);
    }
}

pub fn walk_block_mut<V: VisitorMut>(visitor: &mut V, block: &mut Block) {
    block.for_each_child_sequence_mut(|sequence| visitor.visit_sequence_mut(sequence));
}
