//! Metadata registry settings.

use serde::{Deserialize, Serialize};

const fn default_cache() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Keep built metadata for the lifetime of the registry.
    /// When disabled every request rebuilds the metadata.
    #[serde(default = "default_cache")]
    pub cache: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { cache: default_cache() }
    }
}
