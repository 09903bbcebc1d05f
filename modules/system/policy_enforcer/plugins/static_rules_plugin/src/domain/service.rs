//! Service implementation for the static rules plugin.

use std::path::Path;

use policy_enforcer_sdk::Credentials;
use tracing::trace;

use crate::config::{RulesMode, StaticRulesPluginConfig};

/// Static rule service.
///
/// Ignores policy files entirely:
/// - `allow_all` grants every action to every user
/// - `deny_all` refuses every action to every user
#[derive(Debug, Clone)]
pub struct Service {
    mode: RulesMode,
}

impl Service {
    #[must_use]
    pub fn new(config: &StaticRulesPluginConfig) -> Self {
        Self { mode: config.mode }
    }

    #[must_use]
    pub fn mode(&self) -> RulesMode {
        self.mode
    }

    /// Decide a single action.
    #[must_use]
    pub fn evaluate(&self, action: &str, credentials: &Credentials) -> bool {
        let allowed = self.mode.decision();
        trace!(action, user_id = %credentials.user_id, allowed, "static rule decision");
        allowed
    }

    #[must_use]
    pub fn bind(&self, _policy_path: &Path) -> StaticEnforcer {
        StaticEnforcer {
            service: self.clone(),
        }
    }
}

impl Default for Service {
    fn default() -> Self {
        Self::new(&StaticRulesPluginConfig::default())
    }
}

/// Enforcer handed out for every scope.
#[derive(Debug, Clone)]
pub struct StaticEnforcer {
    pub(super) service: Service,
}
