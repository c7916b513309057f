//! # Folio Store
//!
//! Persistence for the flat post file, and the load path every consumer
//! goes through: read, normalize legacy posts, write back only when the
//! normalizer reported a change.
//!
//! ## Storage backends
//!
//! - **File**: one JSON document on disk (`{"posts": [...], "sections": [...]}`)
//! - **Memory**: for tests and temporary collections
//!
//! Concurrent writers are not coordinated: the last save wins for the whole
//! file.

mod error;
mod file;
mod loader;
mod memory;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use loader::{load_normalized, Loaded};
pub use memory::MemoryStore;

use folio_editor::PostCollection;

/// Read/write access to the stored post collection
pub trait DocumentStore {
    fn load_document(&self) -> StoreResult<PostCollection>;

    fn save_document(&self, collection: &PostCollection) -> StoreResult<()>;
}
