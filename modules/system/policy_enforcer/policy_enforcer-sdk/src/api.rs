//! Seam to the external rule-evaluation engine.
//!
//! The policy enforcer never interprets rules itself. An engine plugin binds
//! one [`Enforcer`] per policy file and answers allow/deny questions for it.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::EngineError;
use crate::models::{Credentials, Target};

/// Factory for per-file enforcers.
///
/// Implemented by engine plugins and injected into the registry:
///
/// ```ignore
/// let engine: Arc<dyn RuleEngine> = Arc::new(CasbinRuleEngine::new(&cfg));
/// let registry = EnforcerRegistry::new(engine, config);
/// ```
pub trait RuleEngine: Send + Sync {
    /// Bind a new enforcer to the policy file at `policy_path`.
    ///
    /// Called once per configured scope on every registry build, whether or
    /// not the file exists. Implementations must not read or parse the file
    /// here; loading is deferred to the first [`Enforcer::enforce`] call.
    fn enforcer_for(&self, policy_path: &Path) -> Arc<dyn Enforcer>;
}

/// A rule evaluator bound to a single policy file.
#[async_trait]
pub trait Enforcer: Send + Sync {
    /// Evaluate `action` against `target` for the given credentials.
    ///
    /// Returns `Ok(false)` for a denial; denial is not an error.
    ///
    /// # Errors
    ///
    /// - `Load` if the bound policy file cannot be read or parsed
    /// - `Evaluation` if the engine fails while evaluating the rule
    async fn enforce(
        &self,
        action: &str,
        target: &Target,
        credentials: &Credentials,
    ) -> Result<bool, EngineError>;
}
