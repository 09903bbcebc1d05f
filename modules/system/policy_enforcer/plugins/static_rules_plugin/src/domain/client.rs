//! [`RuleEngine`] implementation for the static rules plugin.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use policy_enforcer_sdk::{Credentials, EngineError, Enforcer, RuleEngine, Target};

use super::service::{Service, StaticEnforcer};

impl RuleEngine for Service {
    fn enforcer_for(&self, policy_path: &Path) -> Arc<dyn Enforcer> {
        Arc::new(self.bind(policy_path))
    }
}

#[async_trait]
impl Enforcer for StaticEnforcer {
    async fn enforce(
        &self,
        action: &str,
        _target: &Target,
        credentials: &Credentials,
    ) -> Result<bool, EngineError> {
        Ok(self.service.evaluate(action, credentials))
    }
}
