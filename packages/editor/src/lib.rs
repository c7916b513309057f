//! # Folio Editor
//!
//! Block document model for Folio posts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ store: load posts (flat JSON file)          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ migration: legacy encodings → block trees   │
//! │  - runs on every load, idempotent           │
//! │  - reports whether a rewrite is needed      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: factory + mutations on sequences    │
//! │  - create default blocks with unique ids    │
//! │  - update / delete / reorder / insert       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ text: plain-text projection on save         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Ownership by containment**: a block belongs to exactly one sequence
//! 2. **Stable ids**: assigned once by the factory, never reassigned
//! 3. **One level at a time**: mutations act on a single sequence addressed by
//!    a [`SequencePath`]; blocks never move between containers
//! 4. **Expected conditions are not errors**: missing ids and legacy formats
//!    are no-ops or migrations; only misuse (unknown variant) is reported
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{normalize, BlockFactory, Mutation, SequencePath};
//!
//! let (changed, mut post) = normalize(post);
//!
//! let mut factory = BlockFactory::default();
//! let block = factory.create("paragraph", post.blocks().unwrap())?;
//!
//! let blocks = post.blocks_mut().unwrap();
//! Mutation::Insert { path: SequencePath::root(), index: 0, block }.apply(blocks)?;
//! ```

pub mod block;
mod errors;
pub mod factory;
pub mod history;
pub mod id_generator;
pub mod migration;
pub mod mutations;
pub mod path;
pub mod query;
pub mod text;
pub mod validate;
pub mod visitor;

pub use block::{Block, BlockId, BlockKind, Columns, Document, Grid, Heading, Image, Paragraph, Size};
pub use errors::EditorError;
pub use factory::{default_block, BlockFactory};
pub use history::History;
pub use id_generator::{IdGenerator, SequentialIdGenerator, TimeRandomIdGenerator};
pub use migration::{
    normalize, normalize_collection, normalize_in_place, Migration, MigrationReport, Post,
    PostCollection, StoredBlocks, StoredPost,
};
pub use mutations::{append, delete_by_id, insert_at, reorder, update_by_id, Mutation, MutationError};
pub use path::{locate, sequence_at, sequence_at_mut, PathStep, SequencePath};
pub use text::{extract_text, PlainText};
pub use validate::{repair, validate, Violation};
