//! File format backends for [`FileStore`](crate::store::FileStore)

use crate::error::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

/// Trait for file format implementations
///
/// A format turns the whole settings map into text and back. Reads and writes
/// always cover the full file.
pub trait StorageBackend: Clone + Send + Sync {
    /// File extension for this format (e.g., "json")
    fn extension(&self) -> &str;

    /// Serialize data to string
    fn serialize<T: Serialize>(&self, data: &T) -> Result<String>;

    /// Deserialize data from string
    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T>;

    /// Read and deserialize from file, or `None` if the file does not exist
    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::FileRead {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };
        self.deserialize(&content).map(Some)
    }

    /// Serialize and write to file
    ///
    /// Writes to a sibling temp file then renames it over the target. A crash
    /// mid-write leaves the previous file intact.
    fn write<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let content = self.serialize(data)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreate {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let file_name = path.file_name().ok_or_else(|| {
            Error::Config(format!(
                "Invalid path '{}': must have a filename",
                path.display()
            ))
        })?;
        let mut temp_filename = file_name.to_os_string();
        temp_filename.push(".tmp");
        let temp_path = path.with_file_name(temp_filename);

        std::fs::write(&temp_path, &content).map_err(|e| Error::FileWrite {
            path: temp_path.display().to_string(),
            source: e,
        })?;

        std::fs::rename(&temp_path, path).map_err(|e| Error::FileWrite {
            path: path.display().to_string(),
            source: e,
        })
    }
}

// =============================================================================
// JSON Storage Implementation
// =============================================================================

/// JSON file format (default)
#[derive(Clone, Default)]
pub struct JsonStorage {
    pretty: bool,
}

impl JsonStorage {
    /// JSON with pretty printing
    #[must_use]
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Compact JSON (no pretty printing)
    #[must_use]
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl StorageBackend for JsonStorage {
    fn extension(&self) -> &str {
        "json"
    }

    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(data).map_err(Error::from)
        } else {
            serde_json::to_string(data).map_err(Error::from)
        }
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(Error::from)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoredValue;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn sample() -> BTreeMap<String, StoredValue> {
        let mut map = BTreeMap::new();
        map.insert("count".to_string(), StoredValue::Int(3));
        map.insert("name".to_string(), StoredValue::String("abc".into()));
        map
    }

    #[test]
    fn test_json_pretty_vs_compact() {
        let pretty = JsonStorage::new().serialize(&sample()).unwrap();
        assert!(pretty.contains('\n'));

        let compact = JsonStorage::compact().serialize(&sample()).unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.contains(r#""count":{"type":"int","value":3}"#));
    }

    #[test]
    fn test_write_then_read_creates_parent_dirs() {
        let storage = JsonStorage::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/prefs.json");

        storage.write(&path, &sample()).unwrap();
        let loaded: Option<BTreeMap<String, StoredValue>> = storage.read(&path).unwrap();

        assert_eq!(loaded, Some(sample()));
        assert!(!dir.path().join("nested/prefs.json.tmp").exists());
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let storage = JsonStorage::new();
        let dir = tempdir().unwrap();
        let loaded: Option<BTreeMap<String, StoredValue>> =
            storage.read(&dir.path().join("missing.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_read_corrupted_file() {
        let storage = JsonStorage::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result: Result<Option<BTreeMap<String, StoredValue>>> = storage.read(&path);
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
