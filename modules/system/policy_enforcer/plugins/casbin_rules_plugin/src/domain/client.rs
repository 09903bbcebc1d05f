//! [`RuleEngine`] implementation for the Casbin rules plugin.

use std::path::Path;
use std::sync::Arc;

use policy_enforcer_sdk::{Enforcer, RuleEngine};

use super::service::Service;

impl RuleEngine for Service {
    fn enforcer_for(&self, policy_path: &Path) -> Arc<dyn Enforcer> {
        Arc::new(self.bind(policy_path))
    }
}
