//! Validation gate settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Reject metadata that recorded warnings as well as errors.
    #[serde(default)]
    pub warnings_as_errors: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_are_tolerated_by_default() {
        assert!(!ValidationConfig::default().warnings_as_errors);
    }
}
