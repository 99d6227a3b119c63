//! Common test utilities for typed-prefs integration tests
//!
//! Provides a shared resource table, key resources, and fixtures.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use typed_prefs::{MemoryStore, Prefs, ResourceId, ResourceTable};

// =============================================================================
// Resources
// =============================================================================

pub const BOOL_VALUE1: ResourceId = ResourceId(100);
pub const BOOL_VALUE2: ResourceId = ResourceId(101);
pub const INT_VALUE1: ResourceId = ResourceId(110);
pub const FLOAT_VALUE1: ResourceId = ResourceId(120);
pub const STRING_VALUE1: ResourceId = ResourceId(130);
pub const STRING_BOOL: ResourceId = ResourceId(131);
pub const STRING_NUMBER: ResourceId = ResourceId(132);
pub const ARRAY_STRING_SET: ResourceId = ResourceId(140);
pub const RAW_BIN: ResourceId = ResourceId(150);

// Key resources: string resources whose text is the key name
pub const PREFKEY_BOOLEAN: ResourceId = ResourceId(1);
pub const PREFKEY_BYTE: ResourceId = ResourceId(2);
pub const PREFKEY_SHORT: ResourceId = ResourceId(3);
pub const PREFKEY_INT: ResourceId = ResourceId(4);
pub const PREFKEY_LONG: ResourceId = ResourceId(5);
pub const PREFKEY_FLOAT: ResourceId = ResourceId(6);
pub const PREFKEY_DOUBLE: ResourceId = ResourceId(7);
pub const PREFKEY_BIG_INTEGER: ResourceId = ResourceId(8);
pub const PREFKEY_BIG_DECIMAL: ResourceId = ResourceId(9);
pub const PREFKEY_CHAR: ResourceId = ResourceId(10);
pub const PREFKEY_STRING: ResourceId = ResourceId(11);
pub const PREFKEY_STRING_SET: ResourceId = ResourceId(12);
pub const PREFKEY_BIN: ResourceId = ResourceId(13);
pub const PREFKEY_OBJECT: ResourceId = ResourceId(14);
pub const PREFKEY_SERIALIZABLE: ResourceId = ResourceId(15);

/// The resource table shared by every integration test
pub fn resources() -> ResourceTable {
    ResourceTable::new()
        .with_bool(BOOL_VALUE1, true)
        .with_bool(BOOL_VALUE2, false)
        .with_integer(INT_VALUE1, 123)
        .with_float(FLOAT_VALUE1, 1.23)
        .with_string(STRING_VALUE1, "-123")
        .with_string(STRING_BOOL, "true")
        .with_string(STRING_NUMBER, "123")
        .with_string_array(ARRAY_STRING_SET, ["a", "1"])
        .with_string(RAW_BIN, "raw")
        .with_raw(RAW_BIN, vec![0xCA, 0xFE])
        .with_string(PREFKEY_BOOLEAN, "prefkey_boolean")
        .with_string(PREFKEY_BYTE, "prefkey_byte")
        .with_string(PREFKEY_SHORT, "prefkey_short")
        .with_string(PREFKEY_INT, "prefkey_int")
        .with_string(PREFKEY_LONG, "prefkey_long")
        .with_string(PREFKEY_FLOAT, "prefkey_float")
        .with_string(PREFKEY_DOUBLE, "prefkey_double")
        .with_string(PREFKEY_BIG_INTEGER, "prefkey_big_integer")
        .with_string(PREFKEY_BIG_DECIMAL, "prefkey_big_decimal")
        .with_string(PREFKEY_CHAR, "prefkey_char")
        .with_string(PREFKEY_STRING, "prefkey_string")
        .with_string(PREFKEY_STRING_SET, "prefkey_string_set")
        .with_string(PREFKEY_BIN, "prefkey_bin")
        .with_string(PREFKEY_OBJECT, "prefkey_object")
        .with_string(PREFKEY_SERIALIZABLE, "prefkey_serializable")
}

// =============================================================================
// Test Data
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TestData {
    pub name: Option<String>,
    pub id: i32,
}

impl TestData {
    pub fn sample() -> Self {
        Self {
            name: Some("abc".to_string()),
            id: 10,
        }
    }
}

// =============================================================================
// Fixture
// =============================================================================

/// Test fixture with an empty memory store and the shared resources
pub struct TestFixture {
    pub store: Arc<MemoryStore>,
    pub prefs: Prefs,
}

impl TestFixture {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let store = Arc::new(MemoryStore::new());
        let prefs = Prefs::builder()
            .store(store.clone())
            .resources(Arc::new(resources()))
            .build()
            .expect("Failed to build prefs");

        Self { store, prefs }
    }
}
