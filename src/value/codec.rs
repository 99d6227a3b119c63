//! [`PrefValue`] implementations for the built-in logical types

use super::{Defaults, PrefValue, SemanticType, SemanticValue};
use crate::error::{Error, Result};
use crate::store::StoredValue;
use base64::{Engine, engine::general_purpose::STANDARD};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::collections::BTreeSet;
use std::str::FromStr;

pub(crate) fn mismatch(key: &str, expected: SemanticType, stored: &StoredValue) -> Error {
    Error::TypeMismatch {
        key: key.to_string(),
        expected: expected.name(),
        actual: stored.type_name(),
    }
}

/// Types stored as-is in one of the native kinds
macro_rules! passthrough {
    ($ty:ty, $sem:ident, $stored:ident, $default:ident) => {
        impl PrefValue for $ty {
            const TYPE: SemanticType = SemanticType::$sem;

            fn encode(self) -> StoredValue {
                StoredValue::$stored(self)
            }

            fn decode(key: &str, stored: StoredValue) -> Result<Option<Self>> {
                match stored {
                    StoredValue::$stored(v) => Ok(Some(v)),
                    other => Err(mismatch(key, Self::TYPE, &other)),
                }
            }

            fn from_semantic(value: SemanticValue) -> Option<Self> {
                match value {
                    SemanticValue::$sem(v) => Some(v),
                    _ => None,
                }
            }

            fn default_from(defaults: &Defaults) -> Self {
                defaults.$default.clone()
            }
        }
    };
}

passthrough!(bool, Bool, Bool, boolean);
passthrough!(i32, Int, Int, int);
passthrough!(i64, Long, Long, long);
passthrough!(f32, Float, Float, float);
passthrough!(String, String, String, string);
passthrough!(BTreeSet<String>, StringSet, StringSet, string_set);

/// Narrow integers share the store's `Int` slot and truncate on read
macro_rules! narrow_int {
    ($ty:ty, $sem:ident, $default:ident) => {
        impl PrefValue for $ty {
            const TYPE: SemanticType = SemanticType::$sem;

            fn encode(self) -> StoredValue {
                StoredValue::Int(i32::from(self))
            }

            #[allow(clippy::cast_possible_truncation)]
            fn decode(key: &str, stored: StoredValue) -> Result<Option<Self>> {
                match stored {
                    StoredValue::Int(v) => Ok(Some(v as $ty)),
                    other => Err(mismatch(key, Self::TYPE, &other)),
                }
            }

            fn from_semantic(value: SemanticValue) -> Option<Self> {
                match value {
                    SemanticValue::$sem(v) => Some(v),
                    _ => None,
                }
            }

            fn default_from(defaults: &Defaults) -> Self {
                defaults.$default
            }
        }
    };
}

narrow_int!(i8, Byte, byte);
narrow_int!(i16, Short, short);

impl PrefValue for f64 {
    const TYPE: SemanticType = SemanticType::Double;

    #[allow(clippy::cast_possible_wrap)]
    fn encode(self) -> StoredValue {
        StoredValue::Long(self.to_bits() as i64)
    }

    #[allow(clippy::cast_sign_loss)]
    fn decode(key: &str, stored: StoredValue) -> Result<Option<Self>> {
        match stored {
            StoredValue::Long(bits) => Ok(Some(f64::from_bits(bits as u64))),
            other => Err(mismatch(key, Self::TYPE, &other)),
        }
    }

    fn from_semantic(value: SemanticValue) -> Option<Self> {
        match value {
            SemanticValue::Double(v) => Some(v),
            _ => None,
        }
    }

    fn default_from(defaults: &Defaults) -> Self {
        defaults.double
    }
}

/// Read a `String` slot for a type that encodes itself as text
fn stored_text(key: &str, expected: SemanticType, stored: StoredValue) -> Result<String> {
    match stored {
        StoredValue::String(s) => Ok(s),
        other => Err(mismatch(key, expected, &other)),
    }
}

impl PrefValue for BigInt {
    const TYPE: SemanticType = SemanticType::BigInt;

    fn encode(self) -> StoredValue {
        StoredValue::String(self.to_string())
    }

    fn decode(key: &str, stored: StoredValue) -> Result<Option<Self>> {
        let text = stored_text(key, Self::TYPE, stored)?;
        BigInt::from_str(&text)
            .map(Some)
            .map_err(|e| Error::parse(text, Self::TYPE, e))
    }

    fn from_semantic(value: SemanticValue) -> Option<Self> {
        match value {
            SemanticValue::BigInt(v) => Some(v),
            _ => None,
        }
    }

    fn default_from(defaults: &Defaults) -> Self {
        defaults.big_integer.clone()
    }
}

impl PrefValue for BigDecimal {
    const TYPE: SemanticType = SemanticType::BigDecimal;

    fn encode(self) -> StoredValue {
        StoredValue::String(self.to_plain_string())
    }

    fn decode(key: &str, stored: StoredValue) -> Result<Option<Self>> {
        let text = stored_text(key, Self::TYPE, stored)?;
        BigDecimal::from_str(&text)
            .map(Some)
            .map_err(|e| Error::parse(text, Self::TYPE, e))
    }

    fn from_semantic(value: SemanticValue) -> Option<Self> {
        match value {
            SemanticValue::BigDecimal(v) => Some(v),
            _ => None,
        }
    }

    fn default_from(defaults: &Defaults) -> Self {
        defaults.big_decimal.clone()
    }
}

impl PrefValue for char {
    const TYPE: SemanticType = SemanticType::Char;

    fn encode(self) -> StoredValue {
        StoredValue::String(self.to_string())
    }

    fn decode(key: &str, stored: StoredValue) -> Result<Option<Self>> {
        let text = stored_text(key, Self::TYPE, stored)?;
        Ok(text.chars().next())
    }

    fn from_semantic(value: SemanticValue) -> Option<Self> {
        match value {
            SemanticValue::Char(v) => Some(v),
            _ => None,
        }
    }

    fn default_from(defaults: &Defaults) -> Self {
        defaults.char
    }
}

impl PrefValue for Vec<u8> {
    const TYPE: SemanticType = SemanticType::Bin;

    fn encode(self) -> StoredValue {
        StoredValue::String(STANDARD.encode(self))
    }

    fn decode(key: &str, stored: StoredValue) -> Result<Option<Self>> {
        let text = stored_text(key, Self::TYPE, stored)?;
        if text.is_empty() {
            return Ok(None);
        }
        // Line-wrapped Base64 (76-column MIME style) is accepted as well
        let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        STANDARD
            .decode(compact)
            .map(Some)
            .map_err(|source| Error::Decode {
                key: key.to_string(),
                source,
            })
    }

    fn from_semantic(value: SemanticValue) -> Option<Self> {
        match value {
            SemanticValue::Bin(v) => Some(v),
            _ => None,
        }
    }

    fn default_from(defaults: &Defaults) -> Self {
        defaults.bin.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: PrefValue>(value: T) -> Option<T> {
        T::decode("k", value.encode()).unwrap()
    }

    #[test]
    fn test_narrow_ints_truncate() {
        assert_eq!(i8::decode("k", StoredValue::Int(300)).unwrap(), Some(44));
        assert_eq!(i8::decode("k", StoredValue::Int(-129)).unwrap(), Some(127));
        assert_eq!(i16::decode("k", StoredValue::Int(70_000)).unwrap(), Some(4464));
        assert_eq!((-5i8).encode(), StoredValue::Int(-5));
    }

    #[test]
    fn test_double_uses_bit_pattern() {
        assert_eq!(
            1.1f64.encode(),
            StoredValue::Long(0x3FF1_9999_9999_999A)
        );
        let back = roundtrip(1.1f64).unwrap();
        assert_eq!(back.to_bits(), 1.1f64.to_bits());

        let nan = f64::from_bits(0x7FF8_0000_0000_0001);
        assert_eq!(roundtrip(nan).unwrap().to_bits(), nan.to_bits());
    }

    #[test]
    fn test_big_numbers_as_text() {
        let big = BigInt::from_str("123456789012345678901234567890").unwrap();
        assert_eq!(
            big.clone().encode(),
            StoredValue::String("123456789012345678901234567890".into())
        );
        assert_eq!(roundtrip(big.clone()), Some(big));

        let dec = BigDecimal::from_str("1.23").unwrap();
        assert_eq!(dec.clone().encode(), StoredValue::String("1.23".into()));

        let tiny = BigDecimal::from_str("1E-10").unwrap();
        assert_eq!(
            tiny.encode(),
            StoredValue::String("0.0000000001".into())
        );
    }

    #[test]
    fn test_malformed_big_number_is_parse_error() {
        let err = BigInt::decode("k", StoredValue::String("12x".into())).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse {
                target: SemanticType::BigInt,
                ..
            }
        ));

        let err = BigDecimal::decode("k", StoredValue::String("1.2.3".into())).unwrap_err();
        assert!(err.is_coercion_error());
    }

    #[test]
    fn test_char_takes_first_character() {
        assert_eq!(char::decode("k", StoredValue::String("xyz".into())).unwrap(), Some('x'));
        assert_eq!(char::decode("k", StoredValue::String(String::new())).unwrap(), None);
        assert_eq!(roundtrip('é'), Some('é'));
    }

    #[test]
    fn test_bin_base64() {
        let bytes = vec![2u8, 3, 4, 5];
        assert_eq!(bytes.clone().encode(), StoredValue::String("AgMEBQ==".into()));
        assert_eq!(roundtrip(bytes.clone()), Some(bytes));
        assert_eq!(roundtrip(Vec::<u8>::new()), None);

        let wrapped = Vec::<u8>::decode("k", StoredValue::String("AgME\nBQ==\n".into())).unwrap();
        assert_eq!(wrapped, Some(vec![2, 3, 4, 5]));

        let err = Vec::<u8>::decode("k", StoredValue::String("***".into())).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn test_type_mismatch() {
        let err = i32::decode("count", StoredValue::String("1".into())).unwrap_err();
        match err {
            Error::TypeMismatch {
                key,
                expected,
                actual,
            } => {
                assert_eq!(key, "count");
                assert_eq!(expected, "int");
                assert_eq!(actual, "string");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(f64::decode("k", StoredValue::Float(1.0)).is_err());
        assert!(String::decode("k", StoredValue::Int(1)).is_err());
        assert!(Vec::<u8>::decode("k", StoredValue::Bool(true)).is_err());
    }

    #[test]
    fn test_defaults() {
        let defaults = Defaults {
            int: 20,
            string: "cde".into(),
            ..Defaults::default()
        };
        assert_eq!(i32::default_from(&defaults), 20);
        assert_eq!(String::default_from(&defaults), "cde");
        assert_eq!(char::default_from(&defaults), '\0');
    }
}
