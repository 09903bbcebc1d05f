//! Domain models for the policy enforcer.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::ParseScopedActionError;
use crate::user::AuthenticatedUser;

/// The object of an action, e.g. `{"project_id": "..."}` for object creation.
///
/// Checks that have no particular object pass an empty map.
pub type Target = HashMap<String, serde_json::Value>;

/// One requested check: an action within the scope of the service owning its policy.
///
/// Actions are colon separated by convention, e.g. `compute:create_instance`
/// in scope `compute`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopedAction {
    /// Service type managing the policy for the action (e.g. "compute", "identity").
    pub scope: String,
    /// Action to check (e.g. "compute:attach_volume").
    pub action: String,
}

impl ScopedAction {
    #[must_use]
    pub fn new(scope: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            action: action.into(),
        }
    }
}

impl From<(&str, &str)> for ScopedAction {
    fn from((scope, action): (&str, &str)) -> Self {
        Self::new(scope, action)
    }
}

impl fmt::Display for ScopedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scope, self.action)
    }
}

impl FromStr for ScopedAction {
    type Err = ParseScopedActionError;

    /// Parse `<scope>/<action>`. The action may itself contain `/`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((scope, action)) if !scope.is_empty() && !action.is_empty() => {
                Ok(Self::new(scope, action))
            }
            _ => Err(ParseScopedActionError(s.to_owned())),
        }
    }
}

/// Flat attribute record of an authenticated user, as seen by rule engines.
#[derive(Debug)]
pub struct Credentials {
    pub user_id: String,
    pub token: SecretString,
    pub username: String,
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    pub domain_id: Option<String>,
    /// Derived from the user's superuser flag.
    pub is_admin: bool,
    /// Role names in source order. Duplicates are kept.
    pub roles: Vec<String>,
}

/// Who a check is performed for.
pub enum Principal<'a> {
    /// An authenticated user; its credential record is derived (and cached) by the checker.
    User(&'a dyn AuthenticatedUser),
    /// A credential record built by the caller, used as is.
    Credentials(Arc<Credentials>),
}
