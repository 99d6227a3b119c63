//! Logical value types and their store encodings
//!
//! Every logical type a caller can read or write implements [`PrefValue`],
//! which maps it onto one of the store's native [`StoredValue`] kinds:
//!
//! | Logical type | Stored as | Rule |
//! |---|---|---|
//! | `bool`, `i32`, `i64`, `f32`, `String`, `BTreeSet<String>` | same | passthrough |
//! | `i8`, `i16` | `Int` | widened on put, truncated on get |
//! | `f64` | `Long` | raw IEEE-754 bit pattern |
//! | `BigInt` | `String` | base-10 text |
//! | `BigDecimal` | `String` | plain (non-scientific) text |
//! | `char` | `String` | one-char string, empty reads as absent |
//! | `Vec<u8>` | `String` | standard Base64, empty reads as absent |
//!
//! Arbitrary objects are handled separately by the JSON and binary codecs in
//! [`object`].

mod codec;
pub mod object;

use crate::error::Result;
use crate::store::StoredValue;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::collections::BTreeSet;
use std::fmt;

/// The type a caller asserts when reading or writing a value.
///
/// Also the target of default-resource coercion, see [`crate::resolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    BigInt,
    BigDecimal,
    Char,
    String,
    StringSet,
    Bin,
}

impl SemanticType {
    /// Short name used in error messages
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SemanticType::Bool => "bool",
            SemanticType::Byte => "byte",
            SemanticType::Short => "short",
            SemanticType::Int => "int",
            SemanticType::Long => "long",
            SemanticType::Float => "float",
            SemanticType::Double => "double",
            SemanticType::BigInt => "big-integer",
            SemanticType::BigDecimal => "big-decimal",
            SemanticType::Char => "char",
            SemanticType::String => "string",
            SemanticType::StringSet => "string-set",
            SemanticType::Bin => "bin",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value of any [`SemanticType`]
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticValue {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    BigInt(BigInt),
    BigDecimal(BigDecimal),
    Char(char),
    String(String),
    StringSet(BTreeSet<String>),
    Bin(Vec<u8>),
}

impl SemanticValue {
    /// The semantic type of this value
    #[must_use]
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            SemanticValue::Bool(_) => SemanticType::Bool,
            SemanticValue::Byte(_) => SemanticType::Byte,
            SemanticValue::Short(_) => SemanticType::Short,
            SemanticValue::Int(_) => SemanticType::Int,
            SemanticValue::Long(_) => SemanticType::Long,
            SemanticValue::Float(_) => SemanticType::Float,
            SemanticValue::Double(_) => SemanticType::Double,
            SemanticValue::BigInt(_) => SemanticType::BigInt,
            SemanticValue::BigDecimal(_) => SemanticType::BigDecimal,
            SemanticValue::Char(_) => SemanticType::Char,
            SemanticValue::String(_) => SemanticType::String,
            SemanticValue::StringSet(_) => SemanticType::StringSet,
            SemanticValue::Bin(_) => SemanticType::Bin,
        }
    }
}

/// A logical type that can be stored in a settings store.
///
/// Implement this for your own types to read and write them through
/// [`Prefs::get`](crate::Prefs::get) and [`Prefs::put`](crate::Prefs::put).
///
/// # Example
///
/// ```rust
/// use typed_prefs::{Defaults, PrefValue, Result, SemanticType, SemanticValue, StoredValue};
///
/// #[derive(Debug, PartialEq)]
/// struct Rgb(u32);
///
/// impl PrefValue for Rgb {
///     const TYPE: SemanticType = SemanticType::Int;
///
///     fn encode(self) -> StoredValue {
///         StoredValue::Int(self.0 as i32)
///     }
///
///     fn decode(key: &str, stored: StoredValue) -> Result<Option<Self>> {
///         i32::decode(key, stored).map(|v| v.map(|v| Rgb(v as u32)))
///     }
///
///     fn from_semantic(value: SemanticValue) -> Option<Self> {
///         i32::from_semantic(value).map(|v| Rgb(v as u32))
///     }
///
///     fn default_from(_: &Defaults) -> Self {
///         Rgb(0xFFFFFF)
///     }
/// }
/// ```
pub trait PrefValue: Sized {
    /// Semantic type used for resource coercion and error messages
    const TYPE: SemanticType;

    /// Encode into the store's native representation
    fn encode(self) -> StoredValue;

    /// Decode a stored value.
    ///
    /// Returns `Ok(None)` when the stored representation encodes "absent"
    /// (an empty string for `char` and byte arrays).
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`](crate::Error::TypeMismatch) if the stored
    /// kind cannot be read as this type, or a parse/decode error for malformed text.
    fn decode(key: &str, stored: StoredValue) -> Result<Option<Self>>;

    /// Extract from a value produced by the default resolver for [`Self::TYPE`]
    fn from_semantic(value: SemanticValue) -> Option<Self>;

    /// The configured default for this type
    fn default_from(defaults: &Defaults) -> Self;
}

/// Per-type default values returned when a key is absent and no literal
/// default is given.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub boolean: bool,
    pub byte: i8,
    pub short: i16,
    pub int: i32,
    pub long: i64,
    pub float: f32,
    pub double: f64,
    pub big_integer: BigInt,
    pub big_decimal: BigDecimal,
    pub char: char,
    pub string: String,
    pub string_set: BTreeSet<String>,
    pub bin: Vec<u8>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            boolean: false,
            byte: 0,
            short: 0,
            int: 0,
            long: 0,
            float: 0.0,
            double: 0.0,
            big_integer: BigInt::default(),
            big_decimal: BigDecimal::default(),
            char: '\0',
            string: String::new(),
            string_set: BTreeSet::new(),
            bin: Vec::new(),
        }
    }
}
