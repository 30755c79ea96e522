//! The capability interface every catalogue owner implements.
//!
//! The store never talks to a file or a socket directly. It asks a
//! [`CatalogBackend`] to load the collection, to confirm each write, and to
//! persist the result, so the local file and the remote service are
//! interchangeable.

mod error;
mod local;
mod remote;

pub use error::BackendError;
pub use local::LocalBackend;
pub use remote::RemoteBackend;

use async_trait::async_trait;

use crate::catalog::{BookDraft, Collection, Record, RecordId};
use crate::config::{BackendKind, Config};
use crate::storage::FileStore;

/// Owner of the durable copy of the catalogue.
///
/// Identifiers are minted here, at `create`, by whichever backend owns the
/// catalogue. Callers treat them as opaque.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn load(&self) -> Result<Collection, BackendError>;

    /// Assign an identifier to `draft` and return the stored record.
    async fn create(&self, draft: BookDraft) -> Result<Record, BackendError>;

    async fn update(&self, record: Record) -> Result<Record, BackendError>;

    async fn delete(&self, id: &RecordId) -> Result<(), BackendError>;

    /// Persist the full collection after a confirmed change.
    ///
    /// Backends that confirm each write individually have nothing left to
    /// do here.
    async fn save(&self, _collection: &Collection) -> Result<(), BackendError> {
        Ok(())
    }
}

/// Build the backend selected by `storage.backend`.
pub fn build_backend(config: &Config) -> Result<Box<dyn CatalogBackend>, BackendError> {
    match config.storage.backend {
        BackendKind::Local => {
            let dir = config
                .storage
                .data_dir
                .clone()
                .unwrap_or_else(FileStore::default_dir);
            let store = FileStore::new(dir, config.storage.key.clone())?;
            tracing::debug!(path = %store.path().display(), "Using local backend");
            Ok(Box::new(LocalBackend::new(store)))
        }
        BackendKind::Remote => {
            let backend = RemoteBackend::new(&config.remote)?;
            tracing::debug!(url = %backend.collection_url(), "Using remote backend");
            Ok(Box::new(backend))
        }
    }
}
