//! # bindery-config
//!
//! Layered settings for the Bindery metadata engine, loaded with figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`BINDERY_*` prefix, `__` as separator)
//! 2. Project-level `.bindery/config.toml`
//! 3. User-level `~/.config/bindery/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! `BINDERY_VALIDATION__WARNINGS_AS_ERRORS` -> `validation.warnings_as_errors`,
//! `BINDERY_REGISTRY__CACHE` -> `registry.cache`.
//!
//! # Usage
//!
//! ```no_run
//! use bindery_config::BinderyConfig;
//!
//! let config = BinderyConfig::load().expect("config");
//! if config.validation.warnings_as_errors {
//!     println!("strict validation");
//! }
//! ```

mod diagnostics;
mod error;
mod registry;
mod validation;

pub use diagnostics::DiagnosticsConfig;
pub use error::ConfigError;
pub use registry::RegistryConfig;
pub use validation::ValidationConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local settings file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".bindery/config.toml";

/// Prefix of the environment variables figment reads.
pub const ENV_PREFIX: &str = "BINDERY_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BinderyConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
}

impl BinderyConfig {
    /// Load settings from all sources (TOML files + environment variables).
    ///
    /// Does NOT read `.env`; use [`Self::load_with_dotenv`] for that.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::figment().extract()?)
    }

    /// Load settings after reading `.env` from the working directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // a missing .env is not an error
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so callers can layer extra providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path().filter(|path| path.exists()) {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global settings file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bindery").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = BinderyConfig::default();
        assert!(!config.validation.warnings_as_errors);
        assert!(config.diagnostics.log_problems);
        assert!(config.registry.cache);
    }

    #[test]
    fn global_path_sits_under_user_config_dir() {
        let expected = dirs::config_dir().map(|dir| dir.join("bindery/config.toml"));
        assert_eq!(BinderyConfig::global_config_path(), expected);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: BinderyConfig = BinderyConfig::figment().extract()?;
            assert_eq!(config, BinderyConfig::default());
            Ok(())
        });
    }
}
