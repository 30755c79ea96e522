use async_trait::async_trait;

use super::{BackendError, CatalogBackend};
use crate::catalog::{BookDraft, Collection, Record, RecordId};
use crate::storage::Persistence;

/// Backend over a whole-collection snapshot store.
///
/// Writes are confirmed locally; durability comes from [`save`], which the
/// store calls after every applied change.
///
/// [`save`]: CatalogBackend::save
pub struct LocalBackend<P> {
    store: P,
}

impl<P: Persistence> LocalBackend<P> {
    pub fn new(store: P) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &P {
        &self.store
    }
}

#[async_trait]
impl<P: Persistence> CatalogBackend for LocalBackend<P> {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn load(&self) -> Result<Collection, BackendError> {
        Ok(self.store.load()?)
    }

    async fn create(&self, draft: BookDraft) -> Result<Record, BackendError> {
        Ok(draft.into_record(RecordId::generate()))
    }

    async fn update(&self, record: Record) -> Result<Record, BackendError> {
        Ok(record)
    }

    async fn delete(&self, _id: &RecordId) -> Result<(), BackendError> {
        Ok(())
    }

    async fn save(&self, collection: &Collection) -> Result<(), BackendError> {
        Ok(self.store.save(collection)?)
    }
}
