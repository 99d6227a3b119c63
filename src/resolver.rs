//! Default value resolution from resources
//!
//! When a key is absent and a resource id greater than zero is supplied, the
//! resource's value replaces the literal default. The resource is converted to
//! the requested [`SemanticType`] through one closed table keyed by
//! (resource kind, target type):
//!
//! | kind \ target | bool | integers | float/double | char | string | big int | big decimal | string set | bin |
//! |---|---|---|---|---|---|---|---|---|---|
//! | bool | identity | - | - | - | `"true"`/`"false"` | - | - | - | - |
//! | integer | `!= 0` | cast | widen | first char of text | text | exact | exact | - | - |
//! | float | `!= 0.0` | saturate, then truncate | widen | first char of text | text | via i64 | via text | - | - |
//! | string | `"true"` (any case) | parse | parse | first char | identity | parse | parse | - | raw bytes |
//! | string array | - | - | - | - | - | - | - | as set | - |
//!
//! Pairs marked `-` fail with [`Error::UnsupportedCoercion`].

use crate::error::{Error, Result};
use crate::resources::{ResourceId, ResourceProvider, ResourceValue};
use crate::value::{SemanticType, SemanticValue};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::str::FromStr;

/// Text form of a float resource, in the platform's float notation.
///
/// Magnitudes in `[1e-3, 1e7)` (and zero) use plain decimals with at least one
/// fractional digit (`"123.0"`, `"1.23"`). Everything else uses scientific
/// notation with a fractional mantissa and an upper-case `E` (`"1.0E7"`,
/// `"1.0E-4"`, `"1.5E10"`). Non-finite values read `"NaN"`, `"Infinity"`
/// and `"-Infinity"`.
fn float_text(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return format!("{value:?}");
    }

    let sci = format!("{value:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    if mantissa.contains('.') {
        format!("{mantissa}E{exponent}")
    } else {
        format!("{mantissa}.0E{exponent}")
    }
}

fn first_char(text: &str, target: SemanticType) -> Result<char> {
    text.chars()
        .next()
        .ok_or_else(|| Error::parse(text, target, "empty string"))
}

fn parse<T>(text: &str, target: SemanticType) -> Result<T>
where
    T: FromStr,
    T::Err: ToString,
{
    text.parse::<T>().map_err(|e| Error::parse(text, target, e))
}

/// Resolve resource `id` as a value of type `target`.
///
/// # Errors
///
/// - [`Error::ResourceNotFound`] if the id is unknown (or a raw resource is missing)
/// - [`Error::UnsupportedCoercion`] if the (kind, target) pair has no mapping
/// - [`Error::Parse`] if a string resource does not parse as the target
#[allow(clippy::cast_possible_truncation)]
pub fn resolve(
    resources: &dyn ResourceProvider,
    id: ResourceId,
    target: SemanticType,
) -> Result<SemanticValue> {
    let value = resources.value(id).ok_or(Error::ResourceNotFound(id))?;
    let kind = value.kind();
    log::trace!("Resolving default from resource {id} ({kind}) as {target}");

    let unsupported = || Error::UnsupportedCoercion { id, kind, target };

    use SemanticType as T;
    use SemanticValue as V;

    let resolved = match value {
        ResourceValue::Bool(b) => match target {
            T::Bool => V::Bool(b),
            T::String => V::String(b.to_string()),
            T::Byte
            | T::Short
            | T::Int
            | T::Long
            | T::Float
            | T::Double
            | T::BigInt
            | T::BigDecimal
            | T::Char
            | T::StringSet
            | T::Bin => return Err(unsupported()),
        },

        ResourceValue::Integer(n) => match target {
            T::Bool => V::Bool(n != 0),
            T::Byte => V::Byte(n as i8),
            T::Short => V::Short(n as i16),
            T::Int => V::Int(n),
            T::Long => V::Long(i64::from(n)),
            #[allow(clippy::cast_precision_loss)]
            T::Float => V::Float(n as f32),
            T::Double => V::Double(f64::from(n)),
            T::Char => V::Char(first_char(&n.to_string(), target)?),
            T::String => V::String(n.to_string()),
            T::BigInt => V::BigInt(BigInt::from(n)),
            T::BigDecimal => V::BigDecimal(BigDecimal::from(n)),
            T::StringSet | T::Bin => return Err(unsupported()),
        },

        ResourceValue::Float(f) => match target {
            T::Bool => V::Bool(f != 0.0),
            T::Byte => V::Byte(f as i32 as i8),
            T::Short => V::Short(f as i32 as i16),
            T::Int => V::Int(f as i32),
            T::Long => V::Long(f as i64),
            T::Float => V::Float(f),
            T::Double => V::Double(f64::from(f)),
            T::Char => V::Char(first_char(&float_text(f), target)?),
            T::String => V::String(float_text(f)),
            T::BigInt => V::BigInt(BigInt::from(f as i64)),
            T::BigDecimal => V::BigDecimal(parse(&float_text(f), target)?),
            T::StringSet | T::Bin => return Err(unsupported()),
        },

        ResourceValue::String(s) => match target {
            T::Bool => V::Bool(s.eq_ignore_ascii_case("true")),
            T::Byte => V::Byte(parse(&s, target)?),
            T::Short => V::Short(parse(&s, target)?),
            T::Int => V::Int(parse(&s, target)?),
            T::Long => V::Long(parse(&s, target)?),
            T::Float => V::Float(parse(s.trim(), target)?),
            T::Double => V::Double(parse(s.trim(), target)?),
            T::Char => V::Char(first_char(&s, target)?),
            T::BigInt => V::BigInt(parse(&s, target)?),
            T::BigDecimal => V::BigDecimal(parse(&s, target)?),
            T::Bin => V::Bin(resources.raw(id).ok_or(Error::ResourceNotFound(id))?),
            T::String => V::String(s),
            T::StringSet => return Err(unsupported()),
        },

        ResourceValue::StringArray(items) => match target {
            T::StringSet => V::StringSet(items.into_iter().collect()),
            T::Bool
            | T::Byte
            | T::Short
            | T::Int
            | T::Long
            | T::Float
            | T::Double
            | T::BigInt
            | T::BigDecimal
            | T::Char
            | T::String
            | T::Bin => return Err(unsupported()),
        },
    };

    Ok(resolved)
}

// =============================================================================
// Tests
// =============================================================================
