use parking_lot::Mutex;

use super::{Persistence, StorageError};
use crate::catalog::Collection;

/// In-process store. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    collection: Collection,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out as if `collection` had been saved earlier.
    pub fn seeded(collection: Collection) -> Self {
        Self {
            inner: Mutex::new(MemoryStoreInner {
                collection,
                saves: 0,
            }),
        }
    }

    /// Number of successful saves since creation.
    pub fn save_count(&self) -> usize {
        self.inner.lock().saves
    }

    pub fn snapshot(&self) -> Collection {
        self.inner.lock().collection.clone()
    }
}

impl Persistence for MemoryStore {
    fn load(&self) -> Result<Collection, StorageError> {
        Ok(self.snapshot())
    }

    fn save(&self, collection: &Collection) -> Result<(), StorageError> {
        let mut inner = self.inner.lock();
        inner.collection = collection.clone();
        inner.saves += 1;
        Ok(())
    }
}
