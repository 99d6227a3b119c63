//! Object codecs
//!
//! Two ways to store a whole object under one key:
//! - **JSON**: `serde_json` text in a `String` slot
//! - **Binary**: a CBOR object graph (`ciborium`), Base64-wrapped like any byte array

use super::PrefValue;
use super::codec::mismatch;
use super::SemanticType;
use crate::error::{Error, Result};
use crate::store::StoredValue;
use serde::{Serialize, de::DeserializeOwned};

/// Encode an object as JSON text
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<StoredValue> {
    Ok(StoredValue::String(serde_json::to_string(value)?))
}

/// Decode an object from JSON text. An empty string reads as absent.
///
/// # Errors
///
/// Returns an error if the stored value is not a string or is not valid JSON for `T`.
pub fn decode_json<T: DeserializeOwned>(key: &str, stored: StoredValue) -> Result<Option<T>> {
    match stored {
        StoredValue::String(text) if text.trim().is_empty() => Ok(None),
        StoredValue::String(text) => Ok(Some(serde_json::from_str(&text)?)),
        other => Err(mismatch(key, SemanticType::String, &other)),
    }
}

/// Encode an object as Base64-wrapped CBOR bytes
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn encode_binary<T: Serialize + ?Sized>(value: &T) -> Result<StoredValue> {
    let mut bytes = Vec::new();
    ciborium::ser::into_writer(value, &mut bytes).map_err(|e| Error::Binary(e.to_string()))?;
    Ok(bytes.encode())
}

/// Decode an object from Base64-wrapped CBOR bytes. Absent or empty bytes read as absent.
///
/// # Errors
///
/// Returns an error if the stored value is not valid Base64 or not a valid object graph for `T`.
pub fn decode_binary<T: DeserializeOwned>(key: &str, stored: StoredValue) -> Result<Option<T>> {
    let Some(bytes) = Vec::<u8>::decode(key, stored)? else {
        return Ok(None);
    };
    if bytes.is_empty() {
        return Ok(None);
    }
    ciborium::de::from_reader(bytes.as_slice())
        .map(Some)
        .map_err(|e| Error::Binary(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: Option<String>,
        id: i32,
    }

    fn sample() -> Profile {
        Profile {
            name: Some("abc".into()),
            id: 10,
        }
    }

    #[test]
    fn test_json_text_shape() {
        let stored = encode_json(&sample()).unwrap();
        assert_eq!(
            stored,
            StoredValue::String(r#"{"name":"abc","id":10}"#.into())
        );
        assert_eq!(decode_json::<Profile>("k", stored).unwrap(), Some(sample()));
    }

    #[test]
    fn test_json_empty_is_absent() {
        let decoded = decode_json::<Profile>("k", StoredValue::String(String::new())).unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn test_json_wrong_shape() {
        let result = decode_json::<Profile>("k", StoredValue::String("[1,2]".into()));
        assert!(matches!(result, Err(Error::Json(_))));

        let result = decode_json::<Profile>("k", StoredValue::Int(1));
        assert!(matches!(result, Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn test_binary_is_base64_cbor() {
        let stored = encode_binary(&sample()).unwrap();
        let StoredValue::String(text) = &stored else {
            panic!("binary objects are stored as strings");
        };
        assert!(!text.is_empty());
        assert_eq!(decode_binary::<Profile>("k", stored).unwrap(), Some(sample()));
    }

    #[test]
    fn test_binary_garbage() {
        // valid Base64, not a CBOR map
        let result = decode_binary::<Profile>("k", StoredValue::String("AgMEBQ==".into()));
        assert!(matches!(result, Err(Error::Binary(_))));
    }
}
