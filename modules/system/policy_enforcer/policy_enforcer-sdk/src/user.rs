//! Seam to the authentication layer.
//!
//! Authentication happens upstream. The enforcer only reads the attributes
//! of an already authenticated user, and finds that user on the request
//! through a [`UserResolver`].

use std::sync::Arc;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// A role granted to the user in its current scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
}

impl Role {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Read-only view of an authenticated user or session.
///
/// Project and domain attributes are optional because unscoped tokens carry
/// neither.
pub trait AuthenticatedUser: Send + Sync {
    fn id(&self) -> &str;
    fn token(&self) -> &SecretString;
    fn username(&self) -> &str;
    fn project_id(&self) -> Option<&str>;
    fn project_name(&self) -> Option<&str>;
    fn user_domain_id(&self) -> Option<&str>;
    fn is_superuser(&self) -> bool;
    /// Roles in the order the identity service returned them.
    fn roles(&self) -> &[Role];
}

/// Finds the authenticated user attached to an inbound request.
pub trait UserResolver: Send + Sync {
    /// Returns `None` when the request carries no authenticated user.
    fn get_user(&self, request: &http::request::Parts) -> Option<Arc<dyn AuthenticatedUser>>;
}

/// Resolves the user inserted into the request extensions by the
/// authentication middleware as an `Arc<dyn AuthenticatedUser>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionUserResolver;

impl UserResolver for ExtensionUserResolver {
    fn get_user(&self, request: &http::request::Parts) -> Option<Arc<dyn AuthenticatedUser>> {
        request
            .extensions
            .get::<Arc<dyn AuthenticatedUser>>()
            .cloned()
    }
}

/// Plain [`AuthenticatedUser`] for callers without a user type of their own.
///
/// ```ignore
/// let user = SessionUser::new("u-1", "alice", token)
///     .with_project("p-1", "demo")
///     .with_roles(["member"]);
/// ```
#[derive(Debug)]
pub struct SessionUser {
    id: String,
    token: SecretString,
    username: String,
    project_id: Option<String>,
    project_name: Option<String>,
    user_domain_id: Option<String>,
    is_superuser: bool,
    roles: Vec<Role>,
}

impl SessionUser {
    #[must_use]
    pub fn new(id: impl Into<String>, username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token: SecretString::from(token.into()),
            username: username.into(),
            project_id: None,
            project_name: None,
            user_domain_id: None,
            is_superuser: false,
            roles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_project(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.project_id = Some(id.into());
        self.project_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain_id: impl Into<String>) -> Self {
        self.user_domain_id = Some(domain_id.into());
        self
    }

    #[must_use]
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Role::new).collect();
        self
    }

    #[must_use]
    pub fn superuser(mut self, is_superuser: bool) -> Self {
        self.is_superuser = is_superuser;
        self
    }
}

impl AuthenticatedUser for SessionUser {
    fn id(&self) -> &str {
        &self.id
    }

    fn token(&self) -> &SecretString {
        &self.token
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    fn user_domain_id(&self) -> Option<&str> {
        self.user_domain_id.as_deref()
    }

    fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    fn roles(&self) -> &[Role] {
        &self.roles
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn parts_with(user: Option<Arc<dyn AuthenticatedUser>>) -> http::request::Parts {
        let mut builder = http::Request::builder().uri("/project/instances");
        if let Some(user) = user {
            builder = builder.extension(user);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn session_user_builder_sets_attributes() {
        let user = SessionUser::new("u-1", "alice", "tok")
            .with_project("p-1", "demo")
            .with_domain("default")
            .with_roles(["member", "reader"])
            .superuser(true);

        assert_eq!(user.id(), "u-1");
        assert_eq!(user.username(), "alice");
        assert_eq!(user.token().expose_secret(), "tok");
        assert_eq!(user.project_id(), Some("p-1"));
        assert_eq!(user.project_name(), Some("demo"));
        assert_eq!(user.user_domain_id(), Some("default"));
        assert!(user.is_superuser());
        assert_eq!(user.roles(), &[Role::new("member"), Role::new("reader")]);
    }

    #[test]
    fn extension_resolver_finds_user() {
        let user: Arc<dyn AuthenticatedUser> =
            Arc::new(SessionUser::new("u-1", "alice", "tok"));
        let parts = parts_with(Some(user));

        let resolved = ExtensionUserResolver.get_user(&parts);
        assert_eq!(resolved.map(|u| u.id().to_owned()).as_deref(), Some("u-1"));
    }

    #[test]
    fn extension_resolver_returns_none_without_user() {
        let parts = parts_with(None);
        assert!(ExtensionUserResolver.get_user(&parts).is_none());
    }
}
