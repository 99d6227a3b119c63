//! In-memory settings store

use super::{Edit, SettingsStore, StoredValue};
use crate::error::Result;
use crate::sync::StoreLock;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// In-memory settings storage (not persisted)
///
/// Useful as a test double or for settings that should not survive a restart.
pub struct MemoryStore {
    name: String,
    map: RwLock<BTreeMap<String, StoredValue>>,
}

impl MemoryStore {
    /// Create an empty memory store
    #[must_use]
    pub fn new() -> Self {
        Self::named("memory")
    }

    /// Create an empty memory store with a name used in logs
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.read_recovered().len()
    }

    /// True if nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.read_recovered().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for MemoryStore {
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
        for edit in edits {
            edit.apply(&mut map);
        }
        log::debug!("Committed {} edit(s) to store '{}'", edits.len(), self.name);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
