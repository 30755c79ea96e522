//! Whole-collection snapshot persistence.
//!
//! A [`Persistence`] implementation hands back the collection it last saved
//! under its logical key, or an empty one if nothing was saved yet. There is
//! no schema versioning and no merging: the last save wins.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::catalog::Collection;

/// Logical name the collection is stored under unless configured otherwise.
pub const DEFAULT_KEY: &str = "books";

pub trait Persistence: Send + Sync {
    fn load(&self) -> Result<Collection, StorageError>;

    fn save(&self, collection: &Collection) -> Result<(), StorageError>;
}

impl<P: Persistence + ?Sized> Persistence for std::sync::Arc<P> {
    fn load(&self) -> Result<Collection, StorageError> {
        (**self).load()
    }

    fn save(&self, collection: &Collection) -> Result<(), StorageError> {
        (**self).save(collection)
    }
}
