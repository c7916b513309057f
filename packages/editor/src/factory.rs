//! # Block Factory
//!
//! Builds default blocks of a requested variant with an id that is unused in
//! the target document. The id source is a swappable [`IdGenerator`].

use crate::block::{
    Block, BlockId, BlockKind, Columns, Grid, Heading, Image, Paragraph, Size,
    DEFAULT_COLUMN_COUNT, DEFAULT_GRID_COLUMNS, DEFAULT_GRID_GAP, DEFAULT_HEADING_LEVEL,
};
use crate::id_generator::{IdGenerator, TimeRandomIdGenerator};
use crate::query::collect_ids;
use crate::EditorError;
use std::collections::HashSet;

/// Attempts before giving up on a generator that keeps colliding
pub const MAX_ID_ATTEMPTS: usize = 64;

pub struct BlockFactory<G: IdGenerator = TimeRandomIdGenerator> {
    generator: G,
    issued: HashSet<BlockId>,
}

impl Default for BlockFactory<TimeRandomIdGenerator> {
    fn default() -> Self {
        Self::new(TimeRandomIdGenerator::default())
    }
}

impl<G: IdGenerator> BlockFactory<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            issued: HashSet::new(),
        }
    }

    /// Create a block from its type name (`"heading"`, `"grid"`, ...)
    pub fn create(&mut self, type_name: &str, document: &[Block]) -> Result<Block, EditorError> {
        let kind: BlockKind = type_name.parse()?;
        self.create_kind(kind, document)
    }

    /// Create a block whose id is absent from `document` and from every id
    /// this factory issued before.
    pub fn create_kind(&mut self, kind: BlockKind, document: &[Block]) -> Result<Block, EditorError> {
        let existing: HashSet<BlockId> = collect_ids(document).into_iter().collect();
        let id = self.fresh_id(&existing)?;
        Ok(default_block(kind, id))
    }

    /// Ids handed out by this factory and still reserved
    pub fn issued(&self) -> usize {
        self.issued.len()
    }

    /// Release an issued id. Returns whether it was reserved.
    ///
    /// Only release ids that can no longer come back into the document
    /// (for example once the undo history that could restore them is cleared).
    pub fn forget(&mut self, id: &BlockId) -> bool {
        self.issued.remove(id)
    }

    /// Release every issued id; collisions are then checked against the
    /// target document alone.
    pub fn clear_issued(&mut self) {
        self.issued.clear();
    }

    fn fresh_id(&mut self, existing: &HashSet<BlockId>) -> Result<BlockId, EditorError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.generator.next_id();
            if !existing.contains(&id) && !self.issued.contains(&id) {
                self.issued.insert(id.clone());
                return Ok(id);
            }
            tracing::debug!(%id, "generated block id already in use, retrying");
        }

        Err(EditorError::IdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}

/// A block of `kind` with the variant's default fields
pub fn default_block(kind: BlockKind, id: BlockId) -> Block {
    let size = Size::Full;
    match kind {
        BlockKind::Heading => Block::Heading(Heading {
            id,
            size,
            level: DEFAULT_HEADING_LEVEL,
            content: String::new(),
        }),
        BlockKind::Paragraph => Block::Paragraph(Paragraph {
            id,
            size,
            content: String::new(),
        }),
        BlockKind::Image => Block::Image(Image {
            id,
            size,
            url: String::new(),
            alt: String::new(),
        }),
        BlockKind::Columns => Block::Columns(Columns {
            id,
            size,
            column_count: DEFAULT_COLUMN_COUNT,
            children: vec![Vec::new(); DEFAULT_COLUMN_COUNT],
        }),
        BlockKind::Grid => Block::Grid(Grid {
            id,
            size,
            columns: DEFAULT_GRID_COLUMNS,
            gap: DEFAULT_GRID_GAP,
            children: Vec::new(),
        }),
    }
}
