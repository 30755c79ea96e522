use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::{Persistence, StorageError};
use crate::catalog::Collection;

/// Stores the collection as a JSON array in `<dir>/<key>.json`.
///
/// Saves write a sibling temp file and rename it over the target, holding an
/// exclusive lock on `<dir>/<key>.lock` meanwhile. Loads take the shared lock
/// so they never observe a half-written file.
pub struct FileStore {
    dir: PathBuf,
    key: String,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Self {
            dir: dir.into(),
            key,
        })
    }

    /// Default data directory: `<data_dir>/bookshelf`, or `./.bookshelf`
    /// when the platform has none.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("bookshelf"))
            .unwrap_or_else(|| PathBuf::from(".bookshelf"))
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn lock_path(&self) -> PathBuf {
        self.dir.join(format!("{}.lock", self.key))
    }

    fn temp_path(&self) -> PathBuf {
        self.dir
            .join(format!(".{}.json.{}.tmp", self.key, std::process::id()))
    }

    fn open_lock(&self) -> Result<File, StorageError> {
        let path = self.lock_path();
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| StorageError::Lock { path, source })
    }
}

impl Persistence for FileStore {
    fn load(&self) -> Result<Collection, StorageError> {
        let path = self.path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No saved collection, starting empty");
            return Ok(Collection::new());
        }

        let lock = self.open_lock()?;
        FileExt::lock_shared(&lock).map_err(|source| StorageError::Lock {
            path: self.lock_path(),
            source,
        })?;

        let content = fs::read_to_string(&path).map_err(|source| StorageError::Read {
            path: path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Collection::new());
        }

        let collection: Collection =
            serde_json::from_str(&content).map_err(|source| StorageError::Parse {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), records = collection.len(), "Loaded collection");
        Ok(collection)
    }

    fn save(&self, collection: &Collection) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let body = serde_json::to_vec_pretty(collection).map_err(StorageError::Serialize)?;

        let lock = self.open_lock()?;
        FileExt::lock_exclusive(&lock).map_err(|source| StorageError::Lock {
            path: self.lock_path(),
            source,
        })?;

        let temp = self.temp_path();
        write_synced(&temp, &body)?;

        let path = self.path();
        if let Err(source) = fs::rename(&temp, &path) {
            let _ = fs::remove_file(&temp);
            return Err(StorageError::Write { path, source });
        }

        tracing::debug!(path = %path.display(), records = collection.len(), "Saved collection");
        Ok(())
    }
}

fn write_synced(path: &Path, body: &[u8]) -> Result<(), StorageError> {
    let write = || -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(body)?;
        file.sync_all()
    };
    write().map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Keys become file names, so nothing that could escape the directory.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let reason = if key.is_empty() {
        Some("key cannot be empty")
    } else if key.contains('/') || key.contains('\\') || key.contains("..") {
        Some("key contains path separators")
    } else if key.chars().any(char::is_control) {
        Some("key contains control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StorageError::InvalidKey {
            key: key.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
