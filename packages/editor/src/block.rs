//! # Block Model
//!
//! A post body is a tree of typed blocks. Leaf blocks (`Heading`, `Paragraph`,
//! `Image`) carry content; container blocks (`Columns`, `Grid`) own nested
//! block sequences.
//!
//! ## Shapes
//!
//! ```text
//! Columns { columnCount: 2, children: [[..], [..]] }   fixed arity
//! Grid    { columns: 3, gap: 16, children: [..] }      variable arity
//! ```
//!
//! Code that needs to walk the tree goes through the child-sequence capability
//! (`has_child_sequences`, `for_each_child_sequence`, `child_sequence`) rather
//! than matching on every variant.

use crate::EditorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable block identity.
///
/// Older documents stored numeric ids, newer ones use strings. Both are kept
/// in the form they were read so a rewrite does not touch ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Number(n) => write!(f, "{}", n),
            BlockId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        BlockId::Text(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        BlockId::Text(s)
    }
}

impl From<u64> for BlockId {
    fn from(n: u64) -> Self {
        BlockId::Number(n.into())
    }
}

/// Presentational width of a block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    Medium,
    Large,
    #[default]
    Full,
}

/// Variant tag of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Heading,
    Paragraph,
    Image,
    Columns,
    Grid,
}

impl BlockKind {
    pub const ALL: [BlockKind; 5] = [
        BlockKind::Heading,
        BlockKind::Paragraph,
        BlockKind::Image,
        BlockKind::Columns,
        BlockKind::Grid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Heading => "heading",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Image => "image",
            BlockKind::Columns => "columns",
            BlockKind::Grid => "grid",
        }
    }

    /// Whether blocks of this kind own nested sequences
    pub fn is_container(&self) -> bool {
        matches!(self, BlockKind::Columns | BlockKind::Grid)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EditorError::InvalidVariant(s.to_string()))
    }
}

pub const DEFAULT_HEADING_LEVEL: u8 = 2;
pub const DEFAULT_COLUMN_COUNT: usize = 2;
pub const DEFAULT_GRID_COLUMNS: u32 = 3;
pub const DEFAULT_GRID_GAP: u32 = 16;

fn default_heading_level() -> u8 {
    DEFAULT_HEADING_LEVEL
}

fn default_column_count() -> usize {
    DEFAULT_COLUMN_COUNT
}

fn default_grid_columns() -> u32 {
    DEFAULT_GRID_COLUMNS
}

fn default_grid_gap() -> u32 {
    DEFAULT_GRID_GAP
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub id: BlockId,
    #[serde(default)]
    pub size: Size,
    #[serde(default = "default_heading_level")]
    pub level: u8,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub id: BlockId,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: BlockId,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

/// Fixed-arity column layout: `children.len() == column_count`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Columns {
    pub id: BlockId,
    #[serde(default)]
    pub size: Size,
    #[serde(default = "default_column_count")]
    pub column_count: usize,
    #[serde(default)]
    pub children: Vec<Vec<Block>>,
}

impl Columns {
    /// Change the column count, keeping column content by index.
    ///
    /// New columns start empty; columns past the new count are dropped.
    /// A count of zero is raised to one.
    pub fn set_column_count(&mut self, count: usize) {
        let count = count.max(1);
        self.column_count = count;
        self.children.resize_with(count, Vec::new);
    }
}

/// Variable-arity grid layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub id: BlockId,
    #[serde(default)]
    pub size: Size,
    #[serde(default = "default_grid_columns")]
    pub columns: u32,
    #[serde(default = "default_grid_gap")]
    pub gap: u32,
    #[serde(default)]
    pub children: Vec<Block>,
}

/// One node of the content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    Image(Image),
    Columns(Columns),
    Grid(Grid),
}

/// A post body: the ordered top-level blocks
pub type Document = Vec<Block>;

impl Block {
    pub fn heading(id: impl Into<BlockId>, level: u8, content: impl Into<String>) -> Self {
        Block::Heading(Heading {
            id: id.into(),
            size: Size::Full,
            level,
            content: content.into(),
        })
    }

    pub fn paragraph(id: impl Into<BlockId>, content: impl Into<String>) -> Self {
        Block::Paragraph(Paragraph {
            id: id.into(),
            size: Size::Full,
            content: content.into(),
        })
    }

    pub fn image(id: impl Into<BlockId>, url: impl Into<String>, alt: impl Into<String>) -> Self {
        Block::Image(Image {
            id: id.into(),
            size: Size::Full,
            url: url.into(),
            alt: alt.into(),
        })
    }

    /// Column layout whose count is taken from the given columns
    pub fn columns(id: impl Into<BlockId>, children: Vec<Vec<Block>>) -> Self {
        let mut columns = Columns {
            id: id.into(),
            size: Size::Full,
            column_count: children.len(),
            children,
        };
        columns.set_column_count(columns.column_count);
        Block::Columns(columns)
    }

    pub fn grid(id: impl Into<BlockId>, children: Vec<Block>) -> Self {
        Block::Grid(Grid {
            id: id.into(),
            size: Size::Full,
            columns: DEFAULT_GRID_COLUMNS,
            gap: DEFAULT_GRID_GAP,
            children,
        })
    }

    pub fn id(&self) -> &BlockId {
        match self {
            Block::Heading(b) => &b.id,
            Block::Paragraph(b) => &b.id,
            Block::Image(b) => &b.id,
            Block::Columns(b) => &b.id,
            Block::Grid(b) => &b.id,
        }
    }

    // Ids are assigned once; only the mutation engine may restore one.
    pub(crate) fn set_id(&mut self, id: BlockId) {
        match self {
            Block::Heading(b) => b.id = id,
            Block::Paragraph(b) => b.id = id,
            Block::Image(b) => b.id = id,
            Block::Columns(b) => b.id = id,
            Block::Grid(b) => b.id = id,
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading(_) => BlockKind::Heading,
            Block::Paragraph(_) => BlockKind::Paragraph,
            Block::Image(_) => BlockKind::Image,
            Block::Columns(_) => BlockKind::Columns,
            Block::Grid(_) => BlockKind::Grid,
        }
    }

    pub fn size(&self) -> Size {
        match self {
            Block::Heading(b) => b.size,
            Block::Paragraph(b) => b.size,
            Block::Image(b) => b.size,
            Block::Columns(b) => b.size,
            Block::Grid(b) => b.size,
        }
    }

    pub fn set_size(&mut self, size: Size) {
        match self {
            Block::Heading(b) => b.size = size,
            Block::Paragraph(b) => b.size = size,
            Block::Image(b) => b.size = size,
            Block::Columns(b) => b.size = size,
            Block::Grid(b) => b.size = size,
        }
    }

    pub fn has_child_sequences(&self) -> bool {
        self.kind().is_container()
    }

    /// Number of child sequences this block owns
    pub fn slot_count(&self) -> usize {
        match self {
            Block::Columns(c) => c.children.len(),
            Block::Grid(_) => 1,
            _ => 0,
        }
    }

    /// Child sequences in order: one per column, or the grid's single sequence
    pub fn child_sequences(&self) -> Vec<&Vec<Block>> {
        match self {
            Block::Columns(c) => c.children.iter().collect(),
            Block::Grid(g) => vec![&g.children],
            _ => Vec::new(),
        }
    }

    pub fn child_sequences_mut(&mut self) -> Vec<&mut Vec<Block>> {
        match self {
            Block::Columns(c) => c.children.iter_mut().collect(),
            Block::Grid(g) => vec![&mut g.children],
            _ => Vec::new(),
        }
    }

    pub fn for_each_child_sequence<F: FnMut(&[Block])>(&self, mut f: F) {
        for sequence in self.child_sequences() {
            f(sequence.as_slice());
        }
    }

    pub fn for_each_child_sequence_mut<F: FnMut(&mut Vec<Block>)>(&mut self, mut f: F) {
        for sequence in self.child_sequences_mut() {
            f(sequence);
        }
    }

    pub fn child_sequence(&self, slot: usize) -> Option<&Vec<Block>> {
        match self {
            Block::Columns(c) => c.children.get(slot),
            Block::Grid(g) if slot == 0 => Some(&g.children),
            _ => None,
        }
    }

    pub fn child_sequence_mut(&mut self, slot: usize) -> Option<&mut Vec<Block>> {
        match self {
            Block::Columns(c) => c.children.get_mut(slot),
            Block::Grid(g) if slot == 0 => Some(&mut g.children),
            _ => None,
        }
    }

    /// Re-derive container children from the shape fields.
    ///
    /// Only `Columns` has a fixed arity; grids keep their children as-is.
    pub fn reshape(&mut self) {
        if let Block::Columns(c) = self {
            let count = c.column_count;
            c.set_column_count(count);
        }
    }
}
