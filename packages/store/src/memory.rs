use crate::{DocumentStore, StoreResult};
use folio_editor::PostCollection;
use std::cell::{Cell, RefCell};

/// In-memory store (for tests, temp collections)
#[derive(Debug, Default)]
pub struct MemoryStore {
    collection: RefCell<PostCollection>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new(collection: PostCollection) -> Self {
        Self {
            collection: RefCell::new(collection),
            saves: Cell::new(0),
        }
    }

    /// Number of times the collection was written
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn snapshot(&self) -> PostCollection {
        self.collection.borrow().clone()
    }
}

impl DocumentStore for MemoryStore {
    fn load_document(&self) -> StoreResult<PostCollection> {
        Ok(self.snapshot())
    }

    fn save_document(&self, collection: &PostCollection) -> StoreResult<()> {
        *self.collection.borrow_mut() = collection.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
