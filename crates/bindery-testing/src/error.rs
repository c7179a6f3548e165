//! Assertion failures.

use bindery_metadata::ConfigurationError;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionError {
    /// Metadata could not be built or an instance could not be populated.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Unsupported attributes: {}", .0.join(", "))]
    UnsupportedAttributes(Vec<String>),

    #[error("Deprecated attributes: {}", .0.join(", "))]
    DeprecatedAttributes(Vec<String>),

    #[error("Untested attributes: {}", .0.join(", "))]
    UntestedAttributes(Vec<String>),

    #[error("Attribute {attribute} has no getter")]
    MissingGetter { attribute: String },

    #[error("Attribute {attribute}: expected {expected} but was {actual}")]
    ValueMismatch {
        attribute: String,
        expected: Value,
        actual: Value,
    },

    #[error("Unsupported properties: {}", .0.join(", "))]
    UnsupportedProperties(Vec<String>),

    #[error("Deprecated properties: {}", .0.join(", "))]
    DeprecatedProperties(Vec<String>),

    #[error("Untested properties: {}", .0.join(", "))]
    UntestedProperties(Vec<String>),

    #[error("Untested deprecated properties: {}", .0.join(", "))]
    UntestedDeprecatedProperties(Vec<String>),

    #[error("Attributes still hold their default value: {}", .0.join(", "))]
    UnchangedDefaults(Vec<String>),

    #[error(
        "Properties [{properties}] are not equivalent to the current properties: attribute {attribute} expected {expected} but was {actual}"
    )]
    NotEquivalent {
        properties: String,
        attribute: String,
        expected: Value,
        actual: Value,
    },

    #[error("Invoked non-setter method {0}")]
    NonSetterInvoked(String),

    #[error("Invoked legacy setter {method} of deprecated attribute {attribute}")]
    LegacySetterInvoked { method: String, attribute: String },
}
