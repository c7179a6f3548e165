//! Integration tests for TOML and environment loading.
//!
//! Uses `figment::Jail` so files and env vars stay sandboxed per test.

use bindery_config::BinderyConfig;
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[validation]
warnings_as_errors = true

[diagnostics]
log_problems = false

[registry]
cache = false
",
        )?;

        let config: BinderyConfig = Figment::from(Serialized::defaults(BinderyConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.validation.warnings_as_errors);
        assert!(!config.diagnostics.log_problems);
        assert!(!config.registry.cache);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[validation]
warnings_as_errors = true
",
        )?;

        let config: BinderyConfig = Figment::from(Serialized::defaults(BinderyConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.validation.warnings_as_errors);
        assert!(config.diagnostics.log_problems);
        assert!(config.registry.cache);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".bindery")?;
        jail.create_file(
            ".bindery/config.toml",
            r"
[registry]
cache = false
",
        )?;

        let config = BinderyConfig::load().expect("config loads");
        assert!(!config.registry.cache);
        Ok(())
    });
}

#[test]
fn env_var_overrides_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".bindery")?;
        jail.create_file(
            ".bindery/config.toml",
            r"
[validation]
warnings_as_errors = false
",
        )?;
        jail.set_env("BINDERY_VALIDATION__WARNINGS_AS_ERRORS", "true");

        let config = BinderyConfig::load().expect("config loads");
        assert!(config.validation.warnings_as_errors);
        Ok(())
    });
}

#[test]
fn env_var_overrides_default() {
    Jail::expect_with(|jail| {
        jail.set_env("BINDERY_DIAGNOSTICS__LOG_PROBLEMS", "false");

        let config = BinderyConfig::load().expect("config loads");
        assert!(!config.diagnostics.log_problems);
        assert_eq!(config.registry, bindery_config::RegistryConfig::default());
        Ok(())
    });
}

#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("BINDERY_REGISTRY__CACHEE", "false");

        let config = BinderyConfig::load().expect("config loads");
        assert!(config.registry.cache);
        Ok(())
    });
}
