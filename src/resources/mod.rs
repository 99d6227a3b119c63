//! Resource lookup
//!
//! Resources are externally declared, read-only typed constants identified by
//! a numeric [`ResourceId`]. They serve two purposes:
//! - **Default values**: a getter can fall back to a resource instead of a literal
//! - **Key names**: a string resource can name a preference key
//!
//! The resource system itself is consumed through the [`ResourceProvider`] trait.
//! [`ResourceTable`] is an in-memory implementation.

mod table;

pub use table::ResourceTable;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a resource.
///
/// Ids greater than zero are valid lookups. Zero and negative ids mean
/// "no resource" when used as a default fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub i32);

impl ResourceId {
    /// Sentinel meaning "no resource fallback"
    pub const NONE: ResourceId = ResourceId(-1);

    /// True if this id refers to a resource (greater than zero)
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        ResourceId(id)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declared kind of a resource, used by the default resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Bool,
    Integer,
    Float,
    String,
    StringArray,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Bool => "bool",
            ResourceKind::Integer => "integer",
            ResourceKind::Float => "float",
            ResourceKind::String => "string",
            ResourceKind::StringArray => "string-array",
        };
        f.write_str(name)
    }
}

/// A resource value tagged with its declared kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ResourceValue {
    Bool(bool),
    Integer(i32),
    Float(f32),
    String(String),
    StringArray(Vec<String>),
}

impl ResourceValue {
    /// The declared kind of this value
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceValue::Bool(_) => ResourceKind::Bool,
            ResourceValue::Integer(_) => ResourceKind::Integer,
            ResourceValue::Float(_) => ResourceKind::Float,
            ResourceValue::String(_) => ResourceKind::String,
            ResourceValue::StringArray(_) => ResourceKind::StringArray,
        }
    }
}

/// Trait for resource system implementations
pub trait ResourceProvider: Send + Sync {
    /// Resolve the typed value of a resource, or `None` if the id is unknown
    fn value(&self, id: ResourceId) -> Option<ResourceValue>;

    /// Open the raw bytes associated with a resource
    fn raw(&self, id: ResourceId) -> Option<Vec<u8>>;

    /// Resolve a string resource
    fn string(&self, id: ResourceId) -> Option<String> {
        match self.value(id)? {
            ResourceValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Resolve only the declared kind of a resource
    fn kind(&self, id: ResourceId) -> Option<ResourceKind> {
        self.value(id).map(|v| v.kind())
    }
}
