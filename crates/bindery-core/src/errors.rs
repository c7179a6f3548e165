//! Errors raised while invoking descriptor methods.

use thiserror::Error;

/// A raw property string could not be converted to a setter's parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot convert '{value}' to {target}: {reason}")]
pub struct ConversionError {
    /// The raw property value.
    pub value: String,
    /// Short name of the parameter type.
    pub target: String,
    /// Message from the underlying `FromStr` implementation.
    pub reason: String,
}

impl ConversionError {
    pub fn new(
        value: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            target: target.into(),
            reason: reason.into(),
        }
    }
}
