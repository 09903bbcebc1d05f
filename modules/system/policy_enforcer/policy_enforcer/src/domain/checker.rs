//! Access checker: the public entry point for policy checks.

use std::sync::Arc;

use policy_enforcer_sdk::{
    Credentials, PolicyError, Principal, RuleEngine, ScopedAction, Target, UserResolver,
};

use super::credentials::CredentialAdapter;
use super::registry::EnforcerRegistry;
use crate::config::PolicyEnforcerConfig;

/// Checks (scope, action) pairs against the per-scope policy files.
///
/// # Trust boundary
///
/// A pair whose scope has no enforcer (not configured, or its policy file
/// was missing at build time) is allowed by this layer. Enforcement for such
/// scopes is left to the service that ultimately handles the operation.
/// Do not rely on this checker alone to protect a scope without a policy file.
///
/// Constructed once by the composition root and shared by handlers:
///
/// ```ignore
/// let checker = AccessChecker::new(cfg, engine, Arc::new(ExtensionUserResolver));
///
/// let allowed = checker
///     .check_request(&[("identity", "identity:list_users").into()], &parts, &Target::new())
///     .await?;
/// ```
pub struct AccessChecker {
    registry: EnforcerRegistry,
    credentials: CredentialAdapter,
    user_resolver: Arc<dyn UserResolver>,
}

impl AccessChecker {
    #[must_use]
    pub fn new(
        config: PolicyEnforcerConfig,
        engine: Arc<dyn RuleEngine>,
        user_resolver: Arc<dyn UserResolver>,
    ) -> Self {
        let credentials = CredentialAdapter::new(config.credential_cache_capacity);
        Self {
            registry: EnforcerRegistry::new(engine, config),
            credentials,
            user_resolver,
        }
    }

    /// Check every pair in order for the given principal.
    ///
    /// Returns `Ok(false)` at the first pair denied by its scope's enforcer;
    /// later pairs are not evaluated. Pairs in scopes without an enforcer are
    /// allowed. An empty `actions` slice is allowed.
    ///
    /// # Errors
    ///
    /// - `Engine` if a scope's enforcer fails to load or evaluate its rules
    #[tracing::instrument(skip_all, fields(checks = actions.len()))]
    pub async fn check(
        &self,
        actions: &[ScopedAction],
        principal: Principal<'_>,
        target: &Target,
    ) -> Result<bool, PolicyError> {
        let credentials = match principal {
            Principal::User(user) => self.credentials.to_credentials(user),
            Principal::Credentials(credentials) => credentials,
        };
        self.check_credentials(actions, &credentials, target).await
    }

    /// Resolve the authenticated user from the request, then [`check`](Self::check).
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if the request carries no authenticated user
    /// - `Engine` if a scope's enforcer fails to load or evaluate its rules
    pub async fn check_request(
        &self,
        actions: &[ScopedAction],
        request: &http::request::Parts,
        target: &Target,
    ) -> Result<bool, PolicyError> {
        let user = self
            .user_resolver
            .get_user(request)
            .ok_or(PolicyError::Unauthenticated)?;
        self.check(actions, Principal::User(user.as_ref()), target)
            .await
    }

    async fn check_credentials(
        &self,
        actions: &[ScopedAction],
        credentials: &Credentials,
        target: &Target,
    ) -> Result<bool, PolicyError> {
        let enforcers = self.registry.get_or_build();

        for ScopedAction { scope, action } in actions {
            // No enforcer for the scope: allowed here, the downstream API decides.
            let Some(enforcer) = enforcers.get(scope) else {
                continue;
            };

            let allowed = enforcer
                .enforce(action, target, credentials)
                .await
                .map_err(|source| PolicyError::Engine {
                    scope: scope.clone(),
                    source,
                })?;
            if !allowed {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Drop the cached enforcers; the next check rebuilds them from configuration.
    pub fn reset(&self) {
        self.registry.invalidate();
    }

    /// Replace the configuration; the next check rebuilds the enforcers from it.
    ///
    /// The credential cache keeps its original capacity.
    pub fn reconfigure(&self, config: PolicyEnforcerConfig) {
        self.registry.reconfigure(config);
    }

    #[must_use]
    pub fn registry(&self) -> &EnforcerRegistry {
        &self.registry
    }

    #[must_use]
    pub fn credentials(&self) -> &CredentialAdapter {
        &self.credentials
    }
}

impl std::fmt::Debug for AccessChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessChecker")
            .field("registry", &self.registry)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
