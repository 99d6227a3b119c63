//! # typed-prefs - Typed Preferences
//!
//! A typed accessor layered over a simple key-value settings store, with
//! resource-backed defaults and batched edits.
//!
//! ## Features
//!
//! - **Typed Access**: Read and write booleans, integers of every width, floats,
//!   doubles, big numbers, chars, strings, string sets and byte arrays
//! - **Exact Encodings**: Doubles keep their bit pattern, byte arrays are Base64,
//!   big numbers are plain text
//! - **Objects**: Store any `serde` type as JSON text or as a Base64-wrapped binary object graph
//! - **Resource Defaults**: Fall back to a value from a [`ResourceProvider`],
//!   converted to the requested type
//! - **Resource Keys**: Use a string resource as the key name
//! - **Batch Edits**: Buffer writes in an [`EditSession`] and commit them together
//!
//! ## Quick Start
//!
//! ```rust
//! use typed_prefs::Prefs;
//!
//! let mut prefs = Prefs::builder().memory().build()?;
//!
//! prefs.put_boolean("dark_mode", true)?;
//! prefs.put_bin("token", vec![2, 3, 4, 5])?;
//!
//! assert!(prefs.get_boolean("dark_mode")?);
//! assert_eq!(prefs.get_bin_or_none("token")?, Some(vec![2, 3, 4, 5]));
//! assert_eq!(prefs.get_int_or("missing", 10)?, 10);
//! # Ok::<(), typed_prefs::Error>(())
//! ```
//!
//! ## Resource Defaults
//!
//! When a key is absent and a resource id greater than zero is given, the
//! resource replaces the literal default. A string resource `"123"` read as an
//! integer yields `123`:
//!
//! ```rust
//! use typed_prefs::{Prefs, ResourceId, ResourceTable};
//! use std::sync::Arc;
//!
//! const MAX_ITEMS: ResourceId = ResourceId(7);
//!
//! let resources = ResourceTable::new().with_string(MAX_ITEMS, "123");
//! let prefs = Prefs::builder()
//!     .memory()
//!     .resources(Arc::new(resources))
//!     .build()?;
//!
//! assert_eq!(prefs.get_int_or_res("max_items", 10, MAX_ITEMS)?, 123);
//! assert_eq!(prefs.get_int_or_res("max_items", 10, ResourceId::NONE)?, 10);
//! # Ok::<(), typed_prefs::Error>(())
//! ```
//!
//! ## Objects
//!
//! ```rust
//! use typed_prefs::Prefs;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Window {
//!     width: u32,
//!     height: u32,
//! }
//!
//! let mut prefs = Prefs::builder().memory().build()?;
//! let window = Window { width: 800, height: 600 };
//!
//! prefs.put_object("window", &window)?;
//! assert_eq!(prefs.get_object_or_none::<Window>("window")?, Some(window));
//! # Ok::<(), typed_prefs::Error>(())
//! ```
//!
//! ## Stores
//!
//! - [`MemoryStore`]: in-memory, for tests and session-only settings
//! - [`FileStore`]: one JSON file per store, written atomically (requires `file-store` feature, on by default)
//!
//! Implement [`SettingsStore`] to plug in any other backend.

// Core modules
mod error;
mod prefs;
mod sync;

pub mod resolver;
pub mod resources;
pub mod store;
pub mod value;

#[cfg(feature = "file-store")]
pub mod storage;

pub use error::{Error, Result};
pub use prefs::{EditSession, PrefKey, Prefs, PrefsBuilder};
pub use resources::{ResourceId, ResourceKind, ResourceProvider, ResourceTable, ResourceValue};
pub use store::{Edit, MemoryStore, SettingsStore, StoredValue};
pub use value::{Defaults, PrefValue, SemanticType, SemanticValue};

#[cfg(feature = "file-store")]
pub use storage::{JsonStorage, StorageBackend};
#[cfg(feature = "file-store")]
pub use store::FileStore;
