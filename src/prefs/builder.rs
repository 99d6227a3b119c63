//! Fluent construction of [`Prefs`]

use super::Prefs;
use crate::error::{Error, Result};
use crate::resources::{ResourceProvider, ResourceTable};
use crate::store::{MemoryStore, SettingsStore};
use crate::value::Defaults;
use std::fmt;
#[cfg(feature = "file-store")]
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
enum StoreSource {
    Explicit(Arc<dyn SettingsStore>),
    Memory,
    #[cfg(feature = "file-store")]
    Dir(PathBuf),
    #[cfg(feature = "file-store")]
    ConfigDir(String),
}

impl fmt::Debug for StoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreSource::Explicit(store) => write!(f, "Explicit({})", store.name()),
            StoreSource::Memory => f.write_str("Memory"),
            #[cfg(feature = "file-store")]
            StoreSource::Dir(dir) => write!(f, "Dir({})", dir.display()),
            #[cfg(feature = "file-store")]
            StoreSource::ConfigDir(app) => write!(f, "ConfigDir({app})"),
        }
    }
}

/// Builder for creating [`Prefs`] with a fluent API
///
/// # Example
///
/// ```rust,no_run
/// use typed_prefs::{Prefs, ResourceTable};
/// use std::sync::Arc;
///
/// let resources = ResourceTable::new().with_integer(1, 123);
///
/// let prefs = Prefs::builder()
///     .file_dir("~/.config/my-app")
///     .store_name("ui")
///     .pretty_json(false)
///     .resources(Arc::new(resources))
///     .build()?;
/// # Ok::<(), typed_prefs::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct PrefsBuilder {
    source: Option<StoreSource>,
    store_name: Option<String>,
    pretty_json: Option<bool>,
    resources: Option<Arc<dyn ResourceProvider>>,
    defaults: Option<Defaults>,
}

impl fmt::Debug for PrefsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefsBuilder")
            .field("source", &self.source)
            .field("store_name", &self.store_name)
            .field("pretty_json", &self.pretty_json)
            .field("has_resources", &self.resources.is_some())
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl PrefsBuilder {
    /// Create a builder with no store selected
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing store
    #[must_use]
    pub fn store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.source = Some(StoreSource::Explicit(store));
        self
    }

    /// Use a fresh in-memory store
    #[must_use]
    pub fn memory(mut self) -> Self {
        self.source = Some(StoreSource::Memory);
        self
    }

    /// Use a file store in `dir`. A leading `~` expands to the home directory.
    #[cfg(feature = "file-store")]
    #[must_use]
    pub fn file_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let path: PathBuf = dir.into();
        let expanded = if path.starts_with("~") {
            if let Some(home) = dirs::home_dir() {
                home.join(path.strip_prefix("~").unwrap_or(&path))
            } else {
                path
            }
        } else {
            path
        };
        self.source = Some(StoreSource::Dir(expanded));
        self
    }

    /// Use a file store in the platform config directory for `app_name`
    #[cfg(feature = "file-store")]
    #[must_use]
    pub fn in_config_dir(mut self, app_name: impl Into<String>) -> Self {
        self.source = Some(StoreSource::ConfigDir(app_name.into()));
        self
    }

    /// Name of the file store (default: `default_prefs`). Ignored for other stores.
    #[must_use]
    pub fn store_name(mut self, name: impl Into<String>) -> Self {
        self.store_name = Some(name.into());
        self
    }

    /// Write the file store as pretty-printed JSON (default: true). Ignored for other stores.
    #[must_use]
    pub fn pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = Some(pretty);
        self
    }

    /// Resource provider used for resource keys and resource defaults
    #[must_use]
    pub fn resources(mut self, resources: Arc<dyn ResourceProvider>) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Per-type defaults for the `get_*` methods without a literal default
    #[must_use]
    pub fn defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Build the accessor, opening the store if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no store was selected, or an error if the
    /// file store cannot be opened.
    pub fn build(self) -> Result<Prefs> {
        let source = self
            .source
            .ok_or_else(|| Error::Config("No settings store configured".into()))?;

        let store: Arc<dyn SettingsStore> = match source {
            StoreSource::Explicit(store) => store,
            StoreSource::Memory => Arc::new(MemoryStore::new()),
            #[cfg(feature = "file-store")]
            StoreSource::Dir(dir) => Arc::new(Self::open_file(
                dir,
                self.store_name.as_deref(),
                self.pretty_json,
            )?),
            #[cfg(feature = "file-store")]
            StoreSource::ConfigDir(app_name) => {
                let base = dirs::config_dir().ok_or_else(|| {
                    Error::Config("No platform config directory available".into())
                })?;
                Arc::new(Self::open_file(
                    base.join(app_name),
                    self.store_name.as_deref(),
                    self.pretty_json,
                )?)
            }
        };

        log::info!("Preferences ready on store '{}'", store.name());

        let resources = self
            .resources
            .unwrap_or_else(|| Arc::new(ResourceTable::new()));
        let mut prefs = Prefs::with_resources(store, resources);
        if let Some(defaults) = self.defaults {
            prefs.defaults = defaults;
        }
        Ok(prefs)
    }

    #[cfg(feature = "file-store")]
    fn open_file(
        dir: PathBuf,
        name: Option<&str>,
        pretty: Option<bool>,
    ) -> Result<crate::store::FileStore> {
        use crate::storage::JsonStorage;
        use crate::store::{DEFAULT_STORE_NAME, FileStore};

        let storage = if pretty.unwrap_or(true) {
            JsonStorage::new()
        } else {
            JsonStorage::compact()
        };
        FileStore::with_storage(dir, name.unwrap_or(DEFAULT_STORE_NAME), storage)
    }
}
