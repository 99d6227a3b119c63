//! Typed settings accessor
//!
//! This module contains [`Prefs`], the primary entry point for reading and
//! writing typed values, and [`EditSession`] for batched writes.

use crate::error::{Error, Result};
use crate::resolver;
use crate::resources::{ResourceId, ResourceProvider};
use crate::store::{Edit, SettingsStore, StoredValue};
use crate::value::object;
use crate::value::{Defaults, PrefValue};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// A preference key: either a literal name or a string resource holding the name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrefKey {
    Name(String),
    Resource(ResourceId),
}

impl From<&str> for PrefKey {
    fn from(name: &str) -> Self {
        PrefKey::Name(name.to_string())
    }
}

impl From<String> for PrefKey {
    fn from(name: String) -> Self {
        PrefKey::Name(name)
    }
}

impl From<&String> for PrefKey {
    fn from(name: &String) -> Self {
        PrefKey::Name(name.clone())
    }
}

impl From<ResourceId> for PrefKey {
    fn from(id: ResourceId) -> Self {
        PrefKey::Resource(id)
    }
}

/// Generates `put_*` wrappers over `put`/`remove`, one per logical type
macro_rules! typed_puts {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Store a `", stringify!($ty), "` value, or remove the key when `None`.")]
            ///
            /// # Errors
            ///
            /// Returns an error if a resource key cannot be resolved or the store rejects the write.
            pub fn $name(
                &mut self,
                key: impl Into<PrefKey>,
                value: impl Into<Option<$ty>>,
            ) -> Result<&mut Self> {
                match value.into() {
                    Some(v) => self.put(key, v),
                    None => self.remove(key),
                }
            }
        )*
    };
}

/// Write operations shared by [`Prefs`] (commit per call) and [`EditSession`]
/// (buffered). Both provide `key_name` and `apply`.
macro_rules! write_methods {
    () => {
        /// Store a value of any [`PrefValue`](crate::PrefValue) type.
        ///
        /// # Errors
        ///
        /// Returns an error if a resource key cannot be resolved or the store rejects the write.
        pub fn put<T: $crate::value::PrefValue>(
            &mut self,
            key: impl Into<PrefKey>,
            value: T,
        ) -> Result<&mut Self> {
            let key = self.key_name(key.into())?;
            self.apply(Edit::Put {
                key,
                value: <T as $crate::value::PrefValue>::encode(value),
            })
        }

        /// Delete the value stored under `key`.
        ///
        /// # Errors
        ///
        /// Returns an error if a resource key cannot be resolved or the store rejects the write.
        pub fn remove(&mut self, key: impl Into<PrefKey>) -> Result<&mut Self> {
            let key = self.key_name(key.into())?;
            self.apply(Edit::Remove { key })
        }

        /// Delete every stored value.
        ///
        /// # Errors
        ///
        /// Returns an error if the store rejects the write.
        pub fn clear(&mut self) -> Result<&mut Self> {
            self.apply(Edit::Clear)
        }

        /// Store a string, or remove the key when `None`.
        ///
        /// # Errors
        ///
        /// Returns an error if a resource key cannot be resolved or the store rejects the write.
        pub fn put_string<'s>(
            &mut self,
            key: impl Into<PrefKey>,
            value: impl Into<Option<&'s str>>,
        ) -> Result<&mut Self> {
            match value.into() {
                Some(v) => self.put(key, v.to_string()),
                None => self.remove(key),
            }
        }

        /// Store an object as JSON text, or remove the key when `None`.
        ///
        /// # Errors
        ///
        /// Returns an error if the object cannot be serialized, a resource key
        /// cannot be resolved, or the store rejects the write.
        pub fn put_object<'v, T: Serialize + ?Sized + 'v>(
            &mut self,
            key: impl Into<PrefKey>,
            value: impl Into<Option<&'v T>>,
        ) -> Result<&mut Self> {
            match value.into() {
                Some(v) => {
                    let key = self.key_name(key.into())?;
                    let value = object::encode_json(v)?;
                    self.apply(Edit::Put { key, value })
                }
                None => self.remove(key),
            }
        }

        /// Store an object as a Base64-wrapped binary object graph, or remove
        /// the key when `None`.
        ///
        /// # Errors
        ///
        /// Returns an error if the object cannot be serialized, a resource key
        /// cannot be resolved, or the store rejects the write.
        pub fn put_serializable<'v, T: Serialize + ?Sized + 'v>(
            &mut self,
            key: impl Into<PrefKey>,
            value: impl Into<Option<&'v T>>,
        ) -> Result<&mut Self> {
            match value.into() {
                Some(v) => {
                    let key = self.key_name(key.into())?;
                    let value = object::encode_binary(v)?;
                    self.apply(Edit::Put { key, value })
                }
                None => self.remove(key),
            }
        }

        typed_puts! {
            put_boolean: bool,
            put_byte: i8,
            put_short: i16,
            put_int: i32,
            put_long: i64,
            put_float: f32,
            put_double: f64,
            put_big_integer: BigInt,
            put_big_decimal: BigDecimal,
            put_char: char,
            put_string_set: BTreeSet<String>,
            put_bin: Vec<u8>,
        }
    };
}

/// Generates the four `get_*` wrappers per logical type
macro_rules! typed_gets {
    ($($ty:ty => $get:ident, $get_or:ident, $get_or_res:ident, $get_or_none:ident;)*) => {
        $(
            #[doc = concat!("Read a `", stringify!($ty), "`, falling back to the configured default.")]
            ///
            /// # Errors
            ///
            /// Returns an error if the stored value cannot be read as this type.
            pub fn $get(&self, key: impl Into<PrefKey>) -> Result<$ty> {
                self.get::<$ty>(key)
            }

            #[doc = concat!("Read a `", stringify!($ty), "`, falling back to `default`.")]
            ///
            /// # Errors
            ///
            /// Returns an error if the stored value cannot be read as this type.
            pub fn $get_or(&self, key: impl Into<PrefKey>, default: $ty) -> Result<$ty> {
                self.get_or(key, default)
            }

            #[doc = concat!("Read a `", stringify!($ty), "`, falling back to resource `res` (if `> 0`) or `default`.")]
            ///
            /// # Errors
            ///
            /// Returns an error if the stored value cannot be read as this type
            /// or the resource cannot be coerced to it.
            pub fn $get_or_res(
                &self,
                key: impl Into<PrefKey>,
                default: $ty,
                res: impl Into<ResourceId>,
            ) -> Result<$ty> {
                self.get_or_res(key, default, res)
            }

            #[doc = concat!("Read a `", stringify!($ty), "`, or `None` if the key is absent.")]
            ///
            /// # Errors
            ///
            /// Returns an error if the stored value cannot be read as this type.
            pub fn $get_or_none(&self, key: impl Into<PrefKey>) -> Result<Option<$ty>> {
                self.get_or_none::<$ty>(key)
            }
        )*
    };
}

// Declared after the macros above so the session can reuse them
mod builder;
mod session;

pub use builder::PrefsBuilder;
pub use session::EditSession;

/// Typed accessor over a [`SettingsStore`].
///
/// Every write outside an [`EditSession`] is committed immediately. Reads
/// decode the store's native values into the requested logical type and fall
/// back to a literal default, a resource, or the per-type [`Defaults`].
///
/// # Example
///
/// ```rust
/// use typed_prefs::Prefs;
///
/// let mut prefs = Prefs::builder().memory().build()?;
///
/// prefs
///     .put_int("launch_count", 3)?
///     .put_double("ratio", 1.1)?
///     .put_string("name", "abc")?;
///
/// assert_eq!(prefs.get_int("launch_count")?, 3);
/// assert_eq!(prefs.get_double_or_none("ratio")?, Some(1.1));
/// assert_eq!(prefs.get_string_or("missing", "fallback".into())?, "fallback");
/// # Ok::<(), typed_prefs::Error>(())
/// ```
pub struct Prefs {
    store: Arc<dyn SettingsStore>,
    resources: Arc<dyn ResourceProvider>,
    defaults: Defaults,
}

impl fmt::Debug for Prefs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prefs")
            .field("store", &self.store.name())
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl Prefs {
    /// Create a builder for `Prefs` with a fluent API.
    #[must_use]
    pub fn builder() -> PrefsBuilder {
        PrefsBuilder::new()
    }

    /// Create an accessor over `store` with no resources and stock defaults.
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self::with_resources(store, Arc::new(crate::resources::ResourceTable::new()))
    }

    /// Create an accessor over `store` resolving resources through `resources`.
    pub fn with_resources(
        store: Arc<dyn SettingsStore>,
        resources: Arc<dyn ResourceProvider>,
    ) -> Self {
        Self {
            store,
            resources,
            defaults: Defaults::default(),
        }
    }

    /// The underlying store
    #[must_use]
    pub fn store(&self) -> &Arc<dyn SettingsStore> {
        &self.store
    }

    /// The resource provider used for resource keys and defaults
    #[must_use]
    pub fn resources(&self) -> &Arc<dyn ResourceProvider> {
        &self.resources
    }

    /// Per-type defaults used by the `get_*` methods without a literal default
    #[must_use]
    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Mutable access to the per-type defaults
    pub fn defaults_mut(&mut self) -> &mut Defaults {
        &mut self.defaults
    }

    pub(crate) fn key_name(&self, key: PrefKey) -> Result<String> {
        match key {
            PrefKey::Name(name) => Ok(name),
            PrefKey::Resource(id) => self.resources.string(id).ok_or(Error::ResourceNotFound(id)),
        }
    }

    fn apply(&mut self, edit: Edit) -> Result<&mut Self> {
        self.store.commit(std::slice::from_ref(&edit))?;
        Ok(self)
    }

    fn stored(&self, key: PrefKey) -> Result<Option<(String, StoredValue)>> {
        let key = self.key_name(key)?;
        Ok(self.store.get(&key)?.map(|value| (key, value)))
    }

    fn resource_default<T: PrefValue>(&self, default: T, res: ResourceId) -> Result<T> {
        if !res.is_valid() {
            return Ok(default);
        }
        let value = resolver::resolve(self.resources.as_ref(), res, T::TYPE)?;
        let actual = value.semantic_type();
        T::from_semantic(value).ok_or_else(|| Error::TypeMismatch {
            key: res.to_string(),
            expected: T::TYPE.name(),
            actual: actual.name(),
        })
    }

    // -------------------------------------------------------------------------
    // Contains / Dump
    // -------------------------------------------------------------------------

    /// Check whether any value is stored under `key`, regardless of type.
    ///
    /// # Errors
    ///
    /// Returns an error if a resource key cannot be resolved or the store cannot be read.
    pub fn contains(&self, key: impl Into<PrefKey>) -> Result<bool> {
        let key = self.key_name(key.into())?;
        self.store.contains(&key)
    }

    /// Every key/value pair currently stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn all(&self) -> Result<BTreeMap<String, StoredValue>> {
        self.store.all()
    }

    /// Every key currently stored, in sorted order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self.store.all()?.into_keys().collect())
    }

    // -------------------------------------------------------------------------
    // Generic Get
    // -------------------------------------------------------------------------

    /// Read a value, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the stored value cannot be read as `T`,
    /// or a parse/decode error for malformed text encodings.
    pub fn get_or_none<T: PrefValue>(&self, key: impl Into<PrefKey>) -> Result<Option<T>> {
        match self.stored(key.into())? {
            Some((key, value)) => T::decode(&key, value),
            None => Ok(None),
        }
    }

    /// Read a value, falling back to `default`.
    ///
    /// # Errors
    ///
    /// See [`Prefs::get_or_none`].
    pub fn get_or<T: PrefValue>(&self, key: impl Into<PrefKey>, default: T) -> Result<T> {
        Ok(self.get_or_none(key)?.unwrap_or(default))
    }

    /// Read a value, falling back to the per-type [`Defaults`].
    ///
    /// # Errors
    ///
    /// See [`Prefs::get_or_none`].
    pub fn get<T: PrefValue>(&self, key: impl Into<PrefKey>) -> Result<T> {
        match self.get_or_none(key)? {
            Some(v) => Ok(v),
            None => Ok(T::default_from(&self.defaults)),
        }
    }

    /// Read a value, falling back to resource `res` when it is greater than
    /// zero, otherwise to `default`.
    ///
    /// # Errors
    ///
    /// See [`Prefs::get_or_none`]. Additionally fails if the resource is
    /// missing or cannot be coerced to `T`.
    pub fn get_or_res<T: PrefValue>(
        &self,
        key: impl Into<PrefKey>,
        default: T,
        res: impl Into<ResourceId>,
    ) -> Result<T> {
        match self.get_or_none(key)? {
            Some(v) => Ok(v),
            None => self.resource_default(default, res.into()),
        }
    }

    typed_gets! {
        bool => get_boolean, get_boolean_or, get_boolean_or_res, get_boolean_or_none;
        i8 => get_byte, get_byte_or, get_byte_or_res, get_byte_or_none;
        i16 => get_short, get_short_or, get_short_or_res, get_short_or_none;
        i32 => get_int, get_int_or, get_int_or_res, get_int_or_none;
        i64 => get_long, get_long_or, get_long_or_res, get_long_or_none;
        f32 => get_float, get_float_or, get_float_or_res, get_float_or_none;
        f64 => get_double, get_double_or, get_double_or_res, get_double_or_none;
        BigInt => get_big_integer, get_big_integer_or, get_big_integer_or_res, get_big_integer_or_none;
        BigDecimal => get_big_decimal, get_big_decimal_or, get_big_decimal_or_res, get_big_decimal_or_none;
        char => get_char, get_char_or, get_char_or_res, get_char_or_none;
        String => get_string, get_string_or, get_string_or_res, get_string_or_none;
        BTreeSet<String> => get_string_set, get_string_set_or, get_string_set_or_res, get_string_set_or_none;
        Vec<u8> => get_bin, get_bin_or, get_bin_or_res, get_bin_or_none;
    }

    // -------------------------------------------------------------------------
    // Objects
    // -------------------------------------------------------------------------

    /// Read a JSON-encoded object, or `None` if the key is absent or empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is not a string or not valid JSON for `T`.
    pub fn get_object_or_none<T: DeserializeOwned>(
        &self,
        key: impl Into<PrefKey>,
    ) -> Result<Option<T>> {
        match self.stored(key.into())? {
            Some((key, value)) => object::decode_json(&key, value),
            None => Ok(None),
        }
    }

    /// Read a JSON-encoded object, falling back to `default`.
    ///
    /// # Errors
    ///
    /// See [`Prefs::get_object_or_none`].
    pub fn get_object_or<T: DeserializeOwned>(
        &self,
        key: impl Into<PrefKey>,
        default: T,
    ) -> Result<T> {
        Ok(self.get_object_or_none(key)?.unwrap_or(default))
    }

    /// Read a binary-encoded object, or `None` if the key is absent or empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is not valid Base64 or not a
    /// valid object graph for `T`.
    pub fn get_serializable_or_none<T: DeserializeOwned>(
        &self,
        key: impl Into<PrefKey>,
    ) -> Result<Option<T>> {
        match self.stored(key.into())? {
            Some((key, value)) => object::decode_binary(&key, value),
            None => Ok(None),
        }
    }

    /// Read a binary-encoded object, falling back to `default`.
    ///
    /// # Errors
    ///
    /// See [`Prefs::get_serializable_or_none`].
    pub fn get_serializable_or<T: DeserializeOwned>(
        &self,
        key: impl Into<PrefKey>,
        default: T,
    ) -> Result<T> {
        Ok(self.get_serializable_or_none(key)?.unwrap_or(default))
    }

    // -------------------------------------------------------------------------
    // Write (immediate commit)
    // -------------------------------------------------------------------------

    write_methods!();

    // -------------------------------------------------------------------------
    // Batch Edit
    // -------------------------------------------------------------------------

    /// Start a batch edit session.
    ///
    /// Writes issued through the session are buffered and committed together
    /// by [`EditSession::end`] (or when the session is dropped).
    pub fn begin(&mut self) -> EditSession<'_> {
        EditSession::new(self)
    }
}

// =============================================================================
// Tests
// =============================================================================
