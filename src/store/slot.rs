// src/store/slot.rs
//
// Storage slots: the key-value surface the catalog persists into
//
// PRINCIPLES:
// - One string value per key, no partial writes
// - Absent keys read as None, never as an error
// - Removing an absent key is a no-op

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{CatalogError, CatalogResult};

/// A persistent string-keyed slot the store writes its image into.
///
/// Implementations must tolerate keys that were never written:
/// `get` returns `Ok(None)` and `remove` succeeds silently.
pub trait StorageSlot: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> CatalogResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> CatalogResult<()>;

    /// Delete the value under `key`. Absent keys are ignored.
    fn remove(&self, key: &str) -> CatalogResult<()>;
}

/// File-backed slot: a single JSON object document on disk.
///
/// The whole document is rewritten on every `put`/`remove`, through a
/// temp file plus rename so readers never observe a half-written map.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Create a slot backed by the given document path.
    ///
    /// The file is created lazily on first `put`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileSlot { path: path.into() }
    }

    /// Create a slot at the default location.
    ///
    /// Path structure: {APP_DATA}/pavi-catalog/storage.json
    pub fn at_default_location() -> CatalogResult<Self> {
        let app_data_dir = dirs::data_dir()
            .ok_or_else(|| CatalogError::Other("Could not determine app data directory".to_string()))?;

        let catalog_dir = app_data_dir.join("pavi-catalog");

        // Ensure directory exists
        std::fs::create_dir_all(&catalog_dir)?;

        Ok(FileSlot::new(catalog_dir.join("storage.json")))
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> CatalogResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let text = std::fs::read_to_string(&self.path)?;
        let document = serde_json::from_str(&text)?;
        Ok(document)
    }

    fn write_document(&self, document: &HashMap<String, String>) -> CatalogResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let text = serde_json::to_string(document)?;

        // Write-then-rename keeps the previous document intact if the
        // process dies mid-write.
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, text)?;
        std::fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}

impl StorageSlot for FileSlot {
    fn get(&self, key: &str) -> CatalogResult<Option<String>> {
        let document = self.read_document()?;
        Ok(document.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> CatalogResult<()> {
        let mut document = self.read_document()?;
        document.insert(key.to_string(), value.to_string());
        self.write_document(&document)
    }

    fn remove(&self, key: &str) -> CatalogResult<()> {
        let mut document = self.read_document()?;
        if document.remove(key).is_some() {
            self.write_document(&document)?;
        }
        Ok(())
    }
}

/// In-memory slot for tests and throwaway catalogs.
///
/// Clones share the same underlying map, so two store handles opened
/// over clones of one `MemorySlot` persist into the same place.
#[derive(Clone, Default)]
pub struct MemorySlot {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageSlot for MemorySlot {
    fn get(&self, key: &str) -> CatalogResult<Option<String>> {
        let values = self.values.lock().unwrap();
        Ok(values.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> CatalogResult<()> {
        let mut values = self.values.lock().unwrap();
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CatalogResult<()> {
        let mut values = self.values.lock().unwrap();
        values.remove(key);
        Ok(())
    }
}
