//! Configuration error types.

use bindery_core::ConversionError;
use thiserror::Error;

use crate::problems::Problem;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The class recorded errors during inspection; every problem is listed.
    #[error("Configuration class [{class}] is invalid:\n{}", numbered(.problems))]
    Invalid { class: String, problems: Vec<Problem> },

    /// No usable public no-argument constructor.
    #[error("Configuration class [{class}] cannot be instantiated: {reason}")]
    Instantiation { class: String, reason: String },

    /// A property value was rejected by the setter's converter.
    #[error("Invalid value for property '{property}': {source}")]
    Conversion {
        property: String,
        #[source]
        source: ConversionError,
    },

    /// A current property and one of its legacy aliases were both supplied.
    #[error(
        "Attribute [{attribute}] is bound by more than one supplied property: {}",
        .properties.join(", ")
    )]
    ConflictingProperties {
        attribute: String,
        properties: Vec<String>,
    },

    /// A supplied property is not bound by any attribute.
    #[error("Configuration class [{class}] does not support property '{property}'")]
    UnknownProperty { class: String, property: String },
}

/// Render problems as `1) ...` lines.
fn numbered(problems: &[Problem]) -> String {
    problems
        .iter()
        .enumerate()
        .map(|(index, problem)| format!("{}) {problem}", index + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::{ProblemKind, Severity};

    #[test]
    fn invalid_lists_every_problem() {
        let problem = |message: &str| Problem {
            severity: Severity::Error,
            kind: ProblemKind::ClassShape,
            message: message.to_string(),
            class: "Sample".to_string(),
            method: None,
        };
        let err = ConfigurationError::Invalid {
            class: "Sample".to_string(),
            problems: vec![problem("first"), problem("second")],
        };
        let rendered = err.to_string();
        assert!(rendered.starts_with("Configuration class [Sample] is invalid:"));
        assert!(rendered.contains("1) Error: first"));
        assert!(rendered.contains("2) Error: second"));
    }

    #[test]
    fn conflicting_properties_names_all_keys() {
        let err = ConfigurationError::ConflictingProperties {
            attribute: "Email".to_string(),
            properties: vec!["email".to_string(), "exchange-id".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Attribute [Email] is bound by more than one supplied property: email, exchange-id"
        );
    }
}
