//! Configuration for the Casbin rules plugin.

use std::path::PathBuf;

use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CasbinRulesPluginConfig {
    /// Casbin model file shared by every scope. The embedded RBAC model is
    /// used when unset.
    pub model_path: Option<PathBuf>,
}
