//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_catalogue;
pub mod scripted_server;

use std::net::TcpListener;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bookshelf::backend::{BackendError, CatalogBackend, LocalBackend};
use bookshelf::catalog::{BookDraft, Collection, Record, RecordId};
use bookshelf::config::RemoteConfig;
use bookshelf::storage::MemoryStore;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

pub fn dune() -> Record {
    Record::new("1", "Dune", "Herbert", 1965)
}

pub fn emma() -> Record {
    Record::new("2", "Emma", "Austen", 1815)
}

/// The two-book collection used throughout the examples.
pub fn sample() -> Collection {
    Collection::from(vec![dune(), emma()])
}

/// `n` records titled "Book 1".."Book n" with ids "1".."n".
pub fn numbered(n: usize) -> Collection {
    (1..=n)
        .map(|i| Record::new(i.to_string(), format!("Book {}", i), "Anon", 2000 + i as i32))
        .collect()
}

pub fn remote_config(base_url: &str) -> RemoteConfig {
    RemoteConfig {
        base_url: base_url.to_string(),
        path: "books".to_string(),
        timeout_seconds: 2,
        connect_timeout_seconds: 1,
        max_retries: 0,
        retry_backoff_base_ms: 10,
    }
}

/// Local backend over a shared memory store, so tests can inspect saves.
pub fn memory_backend(seed: Collection) -> (Box<dyn CatalogBackend>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::seeded(seed));
    (Box::new(LocalBackend::new(store.clone())), store)
}

/// Backend that can be told to fail every call.
///
/// Counts calls that reached it so tests can assert nothing was attempted.
pub struct SwitchableBackend {
    inner: LocalBackend<Arc<MemoryStore>>,
    failing: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

pub struct BackendSwitch {
    pub store: Arc<MemoryStore>,
    pub failing: Arc<AtomicBool>,
    pub calls: Arc<AtomicUsize>,
}

impl BackendSwitch {
    pub fn fail(&self, on: bool) {
        self.failing.store(on, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn switchable_backend(seed: Collection) -> (Box<dyn CatalogBackend>, BackendSwitch) {
    let store = Arc::new(MemoryStore::seeded(seed));
    let failing = Arc::new(AtomicBool::new(false));
    let calls = Arc::new(AtomicUsize::new(0));
    let backend = SwitchableBackend {
        inner: LocalBackend::new(store.clone()),
        failing: failing.clone(),
        calls: calls.clone(),
    };
    (
        Box::new(backend),
        BackendSwitch {
            store,
            failing,
            calls,
        },
    )
}

impl SwitchableBackend {
    fn check(&self) -> Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(BackendError::Status {
                url: "mock://catalogue".to_string(),
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogBackend for SwitchableBackend {
    fn name(&self) -> &'static str {
        "switchable"
    }

    async fn load(&self) -> Result<Collection, BackendError> {
        self.check()?;
        self.inner.load().await
    }

    async fn create(&self, draft: BookDraft) -> Result<Record, BackendError> {
        self.check()?;
        self.inner.create(draft).await
    }

    async fn update(&self, record: Record) -> Result<Record, BackendError> {
        self.check()?;
        self.inner.update(record).await
    }

    async fn delete(&self, id: &RecordId) -> Result<(), BackendError> {
        self.check()?;
        self.inner.delete(id).await
    }

    async fn save(&self, collection: &Collection) -> Result<(), BackendError> {
        self.check()?;
        self.inner.save(collection).await
    }
}
