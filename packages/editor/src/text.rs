//! # Plain-Text Extraction
//!
//! Derives the linear text used for previews and search from a block tree.
//! Headings and paragraphs contribute their content verbatim as one line
//! each (empty content gives an empty line); images contribute nothing;
//! containers contribute their children in order, columns by index. Lines are
//! joined with `\n` and the result has no trailing newline.
//!
//! The output is a projection only and is never parsed back into blocks.

use crate::block::Block;
use crate::visitor::{walk_block, Visitor};

/// Anything plain text can be extracted from
pub trait PlainText {
    fn collect_lines<'doc>(&'doc self, lines: &mut Vec<&'doc str>);

    fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        self.collect_lines(&mut lines);
        lines.join("\n")
    }
}

struct LineCollector<'doc, 'out> {
    lines: &'out mut Vec<&'doc str>,
}

impl<'doc> Visitor<'doc> for LineCollector<'doc, '_> {
    fn visit_block(&mut self, block: &'doc Block) {
        match block {
            Block::Heading(h) => self.lines.push(&h.content),
            Block::Paragraph(p) => self.lines.push(&p.content),
            Block::Image(_) => {}
            Block::Columns(_) | Block::Grid(_) => walk_block(self, block),
        }
    }
}

impl PlainText for Block {
    fn collect_lines<'doc>(&'doc self, lines: &mut Vec<&'doc str>) {
        LineCollector { lines }.visit_block(self);
    }
}

impl PlainText for [Block] {
    fn collect_lines<'doc>(&'doc self, lines: &mut Vec<&'doc str>) {
        LineCollector { lines }.visit_sequence(self);
    }
}

impl PlainText for Vec<Block> {
    fn collect_lines<'doc>(&'doc self, lines: &mut Vec<&'doc str>) {
        self.as_slice().collect_lines(lines);
    }
}

impl<T: PlainText> PlainText for Option<T> {
    fn collect_lines<'doc>(&'doc self, lines: &mut Vec<&'doc str>) {
        if let Some(node) = self {
            node.collect_lines(lines);
        }
    }
}

/// Plain text of a block, a sequence, or an optional node
pub fn extract_text<T: PlainText + ?Sized>(node: &T) -> String {
    node.plain_text()
}
