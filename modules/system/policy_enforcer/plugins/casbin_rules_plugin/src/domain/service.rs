//! Casbin rule engine service.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::enforcer::{CasbinEnforcer, ModelSource};
use crate::config::CasbinRulesPluginConfig;

/// Binds Casbin enforcers to policy files.
///
/// Every enforcer produced by one engine shares the same model source.
/// Binding never touches the filesystem; see [`CasbinEnforcer`].
#[derive(Debug, Clone)]
pub struct Service {
    model: Arc<ModelSource>,
}

impl Service {
    #[must_use]
    pub fn new(config: &CasbinRulesPluginConfig) -> Self {
        let model = match &config.model_path {
            Some(path) => ModelSource::File(path.clone()),
            None => ModelSource::Embedded,
        };
        Self {
            model: Arc::new(model),
        }
    }

    #[must_use]
    pub fn bind(&self, policy_path: &Path) -> CasbinEnforcer {
        debug!(path = %policy_path.display(), "binding casbin enforcer");
        CasbinEnforcer::new(policy_path.to_path_buf(), Arc::clone(&self.model))
    }

    #[must_use]
    pub fn model(&self) -> &ModelSource {
        &self.model
    }
}

impl Default for Service {
    fn default() -> Self {
        Self::new(&CasbinRulesPluginConfig::default())
    }
}
