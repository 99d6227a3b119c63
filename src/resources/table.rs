//! In-memory resource table

use super::{ResourceId, ResourceProvider, ResourceValue};
use std::collections::HashMap;

/// In-memory resource provider, built with a fluent API.
///
/// # Example
///
/// ```rust
/// use typed_prefs::{ResourceProvider, ResourceTable};
///
/// let resources = ResourceTable::new()
///     .with_string(1, "theme")
///     .with_integer(2, 123)
///     .with_string_array(3, ["a", "1"]);
///
/// assert_eq!(resources.string(1.into()).as_deref(), Some("theme"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceTable {
    values: HashMap<ResourceId, ResourceValue>,
    raw: HashMap<ResourceId, Vec<u8>>,
}

impl ResourceTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a resource value
    #[must_use]
    pub fn with_value(mut self, id: impl Into<ResourceId>, value: ResourceValue) -> Self {
        self.values.insert(id.into(), value);
        self
    }

    /// Declare a boolean resource
    #[must_use]
    pub fn with_bool(self, id: impl Into<ResourceId>, value: bool) -> Self {
        self.with_value(id, ResourceValue::Bool(value))
    }

    /// Declare an integer resource
    #[must_use]
    pub fn with_integer(self, id: impl Into<ResourceId>, value: i32) -> Self {
        self.with_value(id, ResourceValue::Integer(value))
    }

    /// Declare a floating-point resource
    #[must_use]
    pub fn with_float(self, id: impl Into<ResourceId>, value: f32) -> Self {
        self.with_value(id, ResourceValue::Float(value))
    }

    /// Declare a string resource
    #[must_use]
    pub fn with_string(self, id: impl Into<ResourceId>, value: impl Into<String>) -> Self {
        self.with_value(id, ResourceValue::String(value.into()))
    }

    /// Declare a string-array resource
    #[must_use]
    pub fn with_string_array<I, S>(self, id: impl Into<ResourceId>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.with_value(id, ResourceValue::StringArray(values))
    }

    /// Attach raw bytes to a resource id
    #[must_use]
    pub fn with_raw(mut self, id: impl Into<ResourceId>, bytes: impl Into<Vec<u8>>) -> Self {
        self.raw.insert(id.into(), bytes.into());
        self
    }

    /// Number of declared values
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no values are declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ResourceProvider for ResourceTable {
    fn value(&self, id: ResourceId) -> Option<ResourceValue> {
        self.values.get(&id).cloned()
    }

    fn raw(&self, id: ResourceId) -> Option<Vec<u8>> {
        self.raw.get(&id).cloned()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceKind;

    #[test]
    fn test_table_lookup() {
        let table = ResourceTable::new()
            .with_bool(1, true)
            .with_integer(2, 123)
            .with_float(3, 1.23)
            .with_string(4, "-123");

        assert_eq!(table.value(ResourceId(1)), Some(ResourceValue::Bool(true)));
        assert_eq!(table.kind(ResourceId(3)), Some(ResourceKind::Float));
        assert_eq!(table.string(ResourceId(4)).as_deref(), Some("-123"));
        assert_eq!(table.value(ResourceId(99)), None);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_string_lookup_rejects_other_kinds() {
        let table = ResourceTable::new().with_integer(1, 5);
        assert_eq!(table.string(ResourceId(1)), None);
    }

    #[test]
    fn test_raw_bytes() {
        let table = ResourceTable::new()
            .with_string(1, "file")
            .with_raw(1, vec![1, 2, 3]);
        assert_eq!(table.raw(ResourceId(1)), Some(vec![1, 2, 3]));
        assert_eq!(table.raw(ResourceId(2)), None);
    }
}
