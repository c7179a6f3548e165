//! Configuration annotations attached to method declarations.

use serde::Serialize;

/// The deprecated-property marker.
///
/// Carries one or more legacy keys. `replaced_by` names the current property
/// when the marker sits on a dedicated legacy setter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct LegacyConfig {
    pub keys: Vec<String>,
    pub replaced_by: Option<String>,
}

/// All markers a method declaration can carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Annotations {
    /// Current property key (`@Config`).
    pub config: Option<String>,
    /// Legacy property keys (`@LegacyConfig`).
    pub legacy: Option<LegacyConfig>,
    /// Human-readable description (`@ConfigDescription`).
    pub description: Option<String>,
}

impl Annotations {
    /// Whether the declaration carries a current or legacy property marker.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        self.config.is_some() || self.legacy.is_some()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.is_configuration() && self.description.is_none()
    }
}
