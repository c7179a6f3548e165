//! # bindery-metadata
//!
//! Extracts and validates the configuration metadata of a class described
//! through [`bindery_core::ConfigType`].
//!
//! One inspection pass runs the class-level checks (public, concrete, usable
//! no-arg constructor), resolves every attribute across the superclass chain
//! and interfaces, and records all problems instead of stopping at the first.
//! [`MetadataRegistry`] caches the result per type; its `valid_metadata`
//! gate refuses metadata that recorded errors.
//!
//! ```
//! use bindery_core::{ConfigClass, ConfigType, Declare, Method};
//! use bindery_metadata::configuration_metadata;
//!
//! #[derive(Default)]
//! struct ServerConfig {
//!     port: u16,
//! }
//!
//! impl ConfigType for ServerConfig {
//!     fn describe() -> ConfigClass<Self> {
//!         ConfigClass::builder("ServerConfig")
//!             .constructor(Self::default)
//!             .method(Method::getter("get_port", |c: &Self| c.port))
//!             .method(
//!                 Method::setter("set_port", |c: &mut Self, v: u16| c.port = v)
//!                     .config("server.port"),
//!             )
//!             .build()
//!     }
//! }
//!
//! let metadata = configuration_metadata::<ServerConfig>();
//! let port = metadata.attribute("Port").unwrap();
//! assert_eq!(port.injection_point().property(), "server.port");
//! assert!(metadata.problems().is_empty());
//! ```

pub mod classify;
mod error;
mod metadata;
mod problems;
mod registry;
mod resolve;

pub use error::ConfigurationError;
pub use metadata::{AttributeMetadata, ConfigurationMetadata, InjectionPoint};
pub use problems::{Monitor, NullMonitor, Problem, ProblemKind, ProblemReporter, Problems, Severity};
pub use registry::{MetadataRegistry, configuration_metadata, valid_configuration_metadata};
