//! # bindery-core
//!
//! Descriptor types for Bindery configuration classes.
//!
//! A configuration type does not get inspected at runtime. Instead it registers
//! an explicit description of itself through [`ConfigType::describe`]:
//! - [`ConfigClass`]: class-level facts (visibility, abstractness, constructors),
//!   declared methods, superclass and implemented interfaces
//! - [`Method`] / [`MethodDecl`]: one declared method with its shape, its
//!   configuration annotations and an optional invoker
//! - [`Interface`]: declaration-only supertypes whose annotations are inherited
//!   by implementing classes
//! - [`Annotations`]: the current-property, legacy-property and description markers
//!
//! # Usage
//!
//! ```
//! use bindery_core::{ConfigClass, ConfigType, Declare, Method};
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
//!                 Method::setter("set_port", |c: &mut Self, v: u16| c.port = v).config("port"),
//!             )
//!             .build()
//!     }
//! }
//!
//! let class = ServerConfig::describe();
//! assert_eq!(class.methods().len(), 2);
//! ```

mod annotations;
mod class;
mod errors;
mod method;
pub mod naming;

pub use annotations::{Annotations, LegacyConfig};
pub use class::{ConfigClass, ConfigClassBuilder, ConfigType, Constructor, Factory, Interface};
pub use errors::ConversionError;
pub use method::{
    Declare, GetterFn, Invoker, Method, MethodDecl, MethodSignature, SetterFn, Visibility,
};
