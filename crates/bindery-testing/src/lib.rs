//! # bindery-testing
//!
//! Test support for configuration classes described with
//! [`bindery_core::ConfigType`]:
//!
//! - [`TestMonitor`] collects the problems of an inspection for assertions.
//! - [`RecordedConfig`] wraps an instance and records every call made through it.
//! - `check_*` / `assert_*` helpers verify defaults, full property mappings,
//!   legacy-key equivalence and recorded defaults against the metadata.
//! - [`new_instance`] builds an instance from string properties.

mod assertions;
mod error;
mod factory;
mod monitor;
mod recorder;

pub use assertions::{
    Properties, assert_defaults, assert_deprecated_equivalence, assert_full_mapping,
    assert_recorded_defaults, check_defaults, check_deprecated_equivalence, check_full_mapping,
    check_recorded_defaults,
};
pub use error::AssertionError;
pub use factory::new_instance;
pub use monitor::TestMonitor;
pub use recorder::{Invocation, RecordedConfig, record_defaults};
