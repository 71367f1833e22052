//! Key/value storage for client-side state
//!
//! Mirrors the browser's `localStorage` contract: string keys, string
//! values, whole-store `clear`. `FileStorage` persists to a JSON object on
//! disk and rewrites it on every change.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::error::{StorageError, StorageResult};

/// Name of the storage file inside the data directory
pub const STORAGE_FILE: &str = "local_storage.json";

/// String key/value store
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;
    fn clear(&self) -> StorageResult<()>;
}

/// Volatile storage, used for tests and one-off sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.items
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.items
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?
            .remove(key);
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        self.items
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?
            .clear();
        Ok(())
    }
}

/// Storage persisted as a JSON object in a single file
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();

        let items = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| StorageError::Corruption(format!("{}: {}", path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), keys = items.len(), "Opened local storage");

        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    /// Open `local_storage.json` inside `data_dir`
    pub fn in_dir(data_dir: impl AsRef<Path>) -> StorageResult<Self> {
        Self::open(data_dir.as_ref().join(STORAGE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Replace atomically via a sibling temp file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(items)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update<F>(&self, mutate: F) -> StorageResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut items = self
            .items
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        // Memory only changes once the new map is on disk
        let mut next = items.clone();
        mutate(&mut next);
        self.persist(&next)?;
        *items = next;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.update(|items| {
            items.remove(key);
        })
    }

    fn clear(&self) -> StorageResult<()> {
        self.update(|items| items.clear())
    }
}
