//! Configuration for the static rules plugin.

use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticRulesPluginConfig {
    /// Decision returned for every action.
    pub mode: RulesMode,
}

/// Static decision mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RulesMode {
    /// Allow every action in every scope.
    #[default]
    AllowAll,
    /// Deny every action in every scope.
    DenyAll,
}

impl RulesMode {
    #[must_use]
    pub fn decision(self) -> bool {
        matches!(self, Self::AllowAll)
    }
}
