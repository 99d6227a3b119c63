//! File-backed settings store

use super::{Edit, SettingsStore, StoredValue};
use crate::error::{Error, Result};
use crate::storage::{JsonStorage, StorageBackend};
use crate::sync::StoreLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Name of the store used when no explicit name is given
pub const DEFAULT_STORE_NAME: &str = "default_prefs";

/// Settings store persisted to a single file.
///
/// The whole map is kept in memory and rewritten on every commit. A commit
/// that fails to write leaves both the file and the in-memory map untouched.
///
/// # Example
///
/// ```rust,no_run
/// use typed_prefs::store::{FileStore, SettingsStore};
///
/// let store = FileStore::open("/tmp/my-app", "ui")?;
/// assert_eq!(store.name(), "ui");
/// # Ok::<(), typed_prefs::Error>(())
/// ```
pub struct FileStore<S: StorageBackend = JsonStorage> {
    name: String,
    path: PathBuf,
    storage: S,
    map: RwLock<BTreeMap<String, StoredValue>>,
}

impl FileStore<JsonStorage> {
    /// Open (or lazily create) the JSON store `<dir>/<name>.json`
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or an existing file cannot be read.
    pub fn open(dir: impl AsRef<Path>, name: &str) -> Result<Self> {
        Self::with_storage(dir, name, JsonStorage::new())
    }

    /// Open the default store in `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read.
    pub fn open_default(dir: impl AsRef<Path>) -> Result<Self> {
        Self::open(dir, DEFAULT_STORE_NAME)
    }

    /// Open a store in the platform config directory for `app_name`
    ///
    /// # Errors
    ///
    /// Returns an error if the platform has no config directory.
    pub fn in_config_dir(app_name: &str, name: Option<&str>) -> Result<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| Error::Config("No platform config directory available".into()))?;
        Self::open(base.join(app_name), name.unwrap_or(DEFAULT_STORE_NAME))
    }
}

impl<S: StorageBackend> FileStore<S> {
    /// Open a store using a specific file format
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or an existing file cannot be read.
    pub fn with_storage(dir: impl AsRef<Path>, name: &str, storage: S) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::Config("Store name must not be empty".into()));
        }

        let path = dir
            .as_ref()
            .join(format!("{name}.{}", storage.extension()));
        let map: BTreeMap<String, StoredValue> = storage.read(&path)?.unwrap_or_default();
        log::debug!(
            "Opened store '{}' at {} ({} keys)",
            name,
            path.display(),
            map.len()
        );

        Ok(Self {
            name: name.to_string(),
            path,
            storage,
            map: RwLock::new(map),
        })
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<S: StorageBackend> SettingsStore for FileStore<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Result<Option<StoredValue>> {
        Ok(self.map.read_recovered().get(key).cloned())
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.map.read_recovered().contains_key(key))
    }

    fn all(&self) -> Result<BTreeMap<String, StoredValue>> {
        Ok(self.map.read_recovered().clone())
    }

    fn commit(&self, edits: &[Edit]) -> Result<()> {
        let mut map = self.map.write_checked()?;

        let mut next = map.clone();
        for edit in edits {
            edit.apply(&mut next);
        }
        if next == *map {
            return Ok(());
        }

        self.storage.write(&self.path, &next)?;
        *map = next;
        log::debug!(
            "Committed {} edit(s) to store '{}' at {}",
            edits.len(),
            self.name,
            self.path.display()
        );
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
