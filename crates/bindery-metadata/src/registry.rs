//! Per-type metadata cache and validation gate.

use std::any::{Any, TypeId};
use std::sync::{Arc, OnceLock};

use bindery_config::BinderyConfig;
use bindery_core::ConfigType;
use dashmap::DashMap;

use crate::error::ConfigurationError;
use crate::metadata::ConfigurationMetadata;
use crate::problems::{NullMonitor, ProblemReporter};

type Entry = Arc<dyn Any + Send + Sync>;

static GLOBAL: OnceLock<MetadataRegistry> = OnceLock::new();

/// Builds metadata once per configuration type and hands out shared copies.
///
/// Concurrent first requests may each build the metadata; the first one
/// published wins and every caller receives that value.
pub struct MetadataRegistry {
    settings: BinderyConfig,
    entries: DashMap<TypeId, Entry>,
}

impl MetadataRegistry {
    #[must_use]
    pub fn new(settings: BinderyConfig) -> Self {
        Self {
            settings,
            entries: DashMap::new(),
        }
    }

    /// The process-wide registry, configured from [`BinderyConfig::load`].
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| {
            let settings = BinderyConfig::load().unwrap_or_else(|error| {
                tracing::warn!(%error, "failed to load bindery settings; using defaults");
                BinderyConfig::default()
            });
            Self::new(settings)
        })
    }

    /// Metadata for `T`, whatever problems it recorded.
    pub fn metadata<T: ConfigType>(&self) -> Arc<ConfigurationMetadata<T>> {
        if !self.settings.registry.cache {
            return Arc::new(self.build::<T>());
        }

        let key = TypeId::of::<T>();
        let cached = self.entries.get(&key).map(|entry| Arc::clone(entry.value()));
        if let Some(Ok(metadata)) = cached.map(Entry::downcast::<ConfigurationMetadata<T>>) {
            tracing::debug!(
                class = metadata.config_class(),
                "configuration metadata served from cache"
            );
            return metadata;
        }

        let built = Arc::new(self.build::<T>());
        let published = Arc::clone(
            self.entries
                .entry(key)
                .or_insert_with(|| Arc::clone(&built) as Entry)
                .value(),
        );
        published.downcast::<ConfigurationMetadata<T>>().unwrap_or(built)
    }

    /// Metadata for `T`, only when it recorded no errors.
    ///
    /// With `validation.warnings_as_errors` warnings are rejected as well.
    pub fn valid_metadata<T: ConfigType>(
        &self,
    ) -> Result<Arc<ConfigurationMetadata<T>>, ConfigurationError> {
        let metadata = self.metadata::<T>();
        metadata
            .problems()
            .check(self.settings.validation.warnings_as_errors)?;
        Ok(metadata)
    }

    /// Number of cached types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn build<T: ConfigType>(&self) -> ConfigurationMetadata<T> {
        let class = T::describe();
        let reporter = ProblemReporter::new(class.name(), &NullMonitor)
            .log_problems(self.settings.diagnostics.log_problems);
        ConfigurationMetadata::assemble(&class, reporter)
    }
}

impl Default for MetadataRegistry {
    fn default() -> Self {
        Self::new(BinderyConfig::default())
    }
}

/// Metadata for `T` from the global registry, whatever problems it recorded.
pub fn configuration_metadata<T: ConfigType>() -> Arc<ConfigurationMetadata<T>> {
    MetadataRegistry::global().metadata::<T>()
}

/// Validated metadata for `T` from the global registry.
pub fn valid_configuration_metadata<T: ConfigType>()
-> Result<Arc<ConfigurationMetadata<T>>, ConfigurationError> {
    MetadataRegistry::global().valid_metadata::<T>()
}
