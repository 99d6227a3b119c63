//! Error types for typed-prefs

use crate::resources::{ResourceId, ResourceKind};
use crate::value::SemanticType;
use thiserror::Error;

/// Result type alias for typed-prefs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for typed-prefs
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Value Errors
    // -------------------------------------------------------------------------
    #[error("Type mismatch for {key}: expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Failed to parse '{value}' as {target}: {reason}")]
    Parse {
        value: String,
        target: SemanticType,
        reason: String,
    },

    #[error("Invalid Base64 data for {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: base64::DecodeError,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary serialization failed: {0}")]
    Binary(String),

    // -------------------------------------------------------------------------
    // Resource Errors
    // -------------------------------------------------------------------------
    #[error("Resource {0} not found")]
    ResourceNotFound(ResourceId),

    #[error("Resource {id} of kind {kind} cannot be used as {target}")]
    UnsupportedCoercion {
        id: ResourceId,
        kind: ResourceKind,
        target: SemanticType,
    },

    // -------------------------------------------------------------------------
    // I/O Errors (file store)
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Concurrency Errors
    // -------------------------------------------------------------------------
    #[error("Internal lock was poisoned - possible thread panic")]
    LockPoisoned,
}

impl Error {
    /// Check if this is a type mismatch between the stored and requested type
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }

    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ResourceNotFound(_))
    }

    /// Check if a resource could not be turned into the requested type
    #[must_use]
    pub fn is_coercion_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedCoercion { .. } | Error::Parse { .. }
        )
    }

    pub(crate) fn parse(value: impl Into<String>, target: SemanticType, reason: impl ToString) -> Self {
        Error::Parse {
            value: value.into(),
            target,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_predicates() {
        let mismatch = Error::TypeMismatch {
            key: "k".into(),
            expected: "string",
            actual: "int",
        };
        assert!(mismatch.is_type_mismatch());
        assert!(!mismatch.is_not_found());

        let missing = Error::ResourceNotFound(ResourceId(7));
        assert!(missing.is_not_found());

        let parse = Error::parse("abc", SemanticType::Int, "invalid digit");
        assert!(parse.is_coercion_error());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::UnsupportedCoercion {
            id: ResourceId(3),
            kind: ResourceKind::Bool,
            target: SemanticType::Int,
        };
        let msg = err.to_string();
        assert!(msg.contains("#3"));
        assert!(msg.contains("bool"));
        assert!(msg.contains("int"));
    }
}
