//! Error types for the policy enforcer.

use std::path::PathBuf;

/// Failure raised by a rule engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The policy file bound to the enforcer could not be loaded.
    #[error("failed to load policy file {}: {message}", .path.display())]
    Load { path: PathBuf, message: String },

    /// The engine failed while evaluating a rule.
    #[error("rule evaluation failed: {0}")]
    Evaluation(String),
}

/// Error returned by an access check.
///
/// A denial is never an error: it is the `Ok(false)` result of a check.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// No authenticated user could be resolved from the request.
    #[error("no authenticated user on the request")]
    Unauthenticated,

    /// The enforcer for a configured scope failed.
    #[error("policy enforcement failed for scope '{scope}': {source}")]
    Engine {
        scope: String,
        #[source]
        source: EngineError,
    },
}

/// Error parsing a `scope/action` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid scoped action '{0}': expected <scope>/<action>")]
pub struct ParseScopedActionError(pub String);
