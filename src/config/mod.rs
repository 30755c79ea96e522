//! TOML configuration: which backend owns the catalogue, how to reach it,
//! and how the list is paged.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{BackendKind, Config, RemoteConfig, StorageConfig, ViewConfig};
