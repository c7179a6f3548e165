//! Problem logging settings.

use serde::{Deserialize, Serialize};

const fn default_log_problems() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiagnosticsConfig {
    /// Emit a tracing event for every recorded problem.
    #[serde(default = "default_log_problems")]
    pub log_problems: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            log_problems: default_log_problems(),
        }
    }
}
