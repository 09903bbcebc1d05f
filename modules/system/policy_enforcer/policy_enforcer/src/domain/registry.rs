//! Enforcer registry: one enforcer per configured service scope.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};
use policy_enforcer_sdk::{Enforcer, RuleEngine};
use tracing::{debug, warn};

use crate::config::PolicyEnforcerConfig;

/// Enforcers keyed by service scope.
pub type ScopeEnforcers = HashMap<String, Arc<dyn Enforcer>>;

/// Lazily built mapping from service scope to the enforcer of its policy file.
///
/// A scope is present only if its policy file existed when the registry was
/// built. Missing files are skipped with a warning, never an error.
///
/// The built mapping is cached until [`invalidate`](Self::invalidate) or
/// [`reconfigure`](Self::reconfigure). Concurrent first builds are not
/// serialized: each caller may build, the last store wins. Builds are
/// idempotent for a given configuration, so the only cost of the race is
/// repeated file checks and log lines.
pub struct EnforcerRegistry {
    engine: Arc<dyn RuleEngine>,
    config: ArcSwap<PolicyEnforcerConfig>,
    enforcers: ArcSwapOption<ScopeEnforcers>,
}

impl EnforcerRegistry {
    #[must_use]
    pub fn new(engine: Arc<dyn RuleEngine>, config: PolicyEnforcerConfig) -> Self {
        Self {
            engine,
            config: ArcSwap::from_pointee(config),
            enforcers: ArcSwapOption::empty(),
        }
    }

    /// Return the cached mapping, building it from the current configuration
    /// if it has not been built yet.
    #[must_use]
    pub fn get_or_build(&self) -> Arc<ScopeEnforcers> {
        if let Some(enforcers) = self.enforcers.load_full() {
            return enforcers;
        }

        let built = Arc::new(self.build());
        self.enforcers.store(Some(Arc::clone(&built)));
        built
    }

    /// Drop the cached mapping; the next lookup rebuilds it.
    pub fn invalidate(&self) {
        self.enforcers.store(None);
    }

    /// Replace the configuration and drop the cached mapping.
    pub fn reconfigure(&self, config: PolicyEnforcerConfig) {
        self.config.store(Arc::new(config));
        self.invalidate();
    }

    /// Whether a mapping is currently cached.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.enforcers.load().is_some()
    }

    /// Scopes with an enforcer, sorted. Builds the mapping if needed.
    #[must_use]
    pub fn scopes(&self) -> Vec<String> {
        let mut scopes: Vec<String> = self.get_or_build().keys().cloned().collect();
        scopes.sort_unstable();
        scopes
    }

    #[must_use]
    pub fn config(&self) -> Arc<PolicyEnforcerConfig> {
        self.config.load_full()
    }

    fn build(&self) -> ScopeEnforcers {
        let config = self.config.load();
        let mut enforcers = ScopeEnforcers::with_capacity(config.policy_files.len());

        for (scope, relative) in &config.policy_files {
            let path = config.resolve(relative);
            let enforcer = self.engine.enforcer_for(&path);
            if path.is_file() {
                debug!(scope = %scope, path = %path.display(), "adding enforcer for scope");
                enforcers.insert(scope.clone(), enforcer);
            } else {
                warn!(scope = %scope, path = %path.display(), "policy file for scope not found");
            }
        }

        enforcers
    }
}

impl std::fmt::Debug for EnforcerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnforcerRegistry")
            .field("config", &*self.config.load())
            .field("built", &self.is_built())
            .finish_non_exhaustive()
    }
}
