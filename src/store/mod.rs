//! Settings store abstraction
//!
//! A settings store is a persistent mapping from string keys to a small set of
//! native value kinds ([`StoredValue`]). Typed access is layered on top by
//! [`Prefs`](crate::Prefs); the store only needs to:
//! - Read a single value or dump everything
//! - Apply an ordered batch of [`Edit`]s atomically
//!
//! Backends:
//! - **Memory**: [`MemoryStore`], for tests and session-only settings
//! - **File**: [`FileStore`], a file persisted through a [`StorageBackend`](crate::storage::StorageBackend)
//!   (requires `file-store` feature)

#[cfg(feature = "file-store")]
mod file;
mod memory;

#[cfg(feature = "file-store")]
pub use file::{DEFAULT_STORE_NAME, FileStore};
pub use memory::MemoryStore;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A value in one of the kinds a settings store holds natively
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StoredValue {
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(#[serde(with = "float_repr")] f32),
    String(String),
    StringSet(BTreeSet<String>),
}

impl StoredValue {
    /// Short name of the stored kind, used in error messages
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            StoredValue::Bool(_) => "bool",
            StoredValue::Int(_) => "int",
            StoredValue::Long(_) => "long",
            StoredValue::Float(_) => "float",
            StoredValue::String(_) => "string",
            StoredValue::StringSet(_) => "string-set",
        }
    }
}

/// JSON has no literal for NaN or the infinities. Finite floats are written
/// as numbers, the rest as their text form (`"NaN"`, `"inf"`, `"-inf"`).
mod float_repr {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f32(*value)
        } else {
            serializer.collect_str(value)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f32),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => text
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid float '{text}'"))),
        }
    }
}

/// A single pending modification of a store
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Insert or replace a value
    Put { key: String, value: StoredValue },
    /// Delete a key (no-op if absent)
    Remove { key: String },
    /// Delete every key
    Clear,
}

impl Edit {
    /// Apply this edit to a map
    pub fn apply(&self, map: &mut BTreeMap<String, StoredValue>) {
        match self {
            Edit::Put { key, value } => {
                map.insert(key.clone(), value.clone());
            }
            Edit::Remove { key } => {
                map.remove(key);
            }
            Edit::Clear => map.clear(),
        }
    }
}

/// Trait for settings store implementations
pub trait SettingsStore: Send + Sync {
    /// Store name for logging/debugging
    fn name(&self) -> &str;

    /// Read the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<StoredValue>>;

    /// Check if any value is stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Dump every key/value pair currently stored
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn all(&self) -> Result<BTreeMap<String, StoredValue>>;

    /// Apply `edits` in order as one atomic batch
    ///
    /// Readers must observe either none or all of the edits.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch cannot be persisted. In that case no edit
    /// is applied.
    fn commit(&self, edits: &[Edit]) -> Result<()>;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_apply_in_order() {
        let mut map = BTreeMap::new();
        let edits = [
            Edit::Put {
                key: "a".into(),
                value: StoredValue::Int(1),
            },
            Edit::Put {
                key: "a".into(),
                value: StoredValue::Int(2),
            },
            Edit::Put {
                key: "b".into(),
                value: StoredValue::Bool(true),
            },
            Edit::Remove { key: "b".into() },
        ];
        for edit in &edits {
            edit.apply(&mut map);
        }

        assert_eq!(map.get("a"), Some(&StoredValue::Int(2)));
        assert!(!map.contains_key("b"));

        Edit::Clear.apply(&mut map);
        assert!(map.is_empty());
    }

    #[test]
    fn test_non_finite_float_json() {
        let json = serde_json::to_value(StoredValue::Float(f32::NAN)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "float", "value": "NaN"}));

        for value in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -0.0, 1.5] {
            let text = serde_json::to_string(&StoredValue::Float(value)).unwrap();
            let back: StoredValue = serde_json::from_str(&text).unwrap();
            let StoredValue::Float(back) = back else {
                panic!("expected a float, got {back:?}");
            };
            assert_eq!(back.is_nan(), value.is_nan());
            if !value.is_nan() {
                assert_eq!(back.to_bits(), value.to_bits());
            }
        }

        let bad = serde_json::from_str::<StoredValue>(r#"{"type":"float","value":"abc"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_stored_value_json_shape() {
        let json = serde_json::to_value(StoredValue::Long(5)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "long", "value": 5}));

        let back: StoredValue =
            serde_json::from_value(serde_json::json!({"type": "float", "value": 1.5})).unwrap();
        assert_eq!(back, StoredValue::Float(1.5));
    }
}
