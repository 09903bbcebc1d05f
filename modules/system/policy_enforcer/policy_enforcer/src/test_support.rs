#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use policy_enforcer_sdk::{
    AuthenticatedUser, Credentials, EngineError, Enforcer, Role, RuleEngine, SessionUser, Target,
};
use secrecy::SecretString;
use tempfile::TempDir;

use crate::config::PolicyEnforcerConfig;

/// Engine double: hands out pre-registered enforcers by policy file name and
/// counts how many enforcers it was asked to bind.
pub struct MockEngine {
    constructed: AtomicUsize,
    bound: Mutex<Vec<PathBuf>>,
    by_file: HashMap<String, Arc<dyn Enforcer>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            constructed: AtomicUsize::new(0),
            bound: Mutex::new(Vec::new()),
            by_file: HashMap::new(),
        }
    }

    /// Enforcer returned for policy files named `file_name`. Others allow everything.
    pub fn with_enforcer(mut self, file_name: &str, enforcer: Arc<dyn Enforcer>) -> Self {
        self.by_file.insert(file_name.to_owned(), enforcer);
        self
    }

    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::SeqCst)
    }

    pub fn bound_paths(&self) -> Vec<PathBuf> {
        self.bound.lock().clone()
    }
}

impl RuleEngine for MockEngine {
    fn enforcer_for(&self, policy_path: &Path) -> Arc<dyn Enforcer> {
        self.constructed.fetch_add(1, Ordering::SeqCst);
        self.bound.lock().push(policy_path.to_path_buf());

        let name = policy_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.by_file
            .get(name)
            .cloned()
            .unwrap_or_else(|| Arc::new(FixedEnforcer::new(true)))
    }
}

/// Returns a fixed decision and records what it was asked.
pub struct FixedEnforcer {
    decision: bool,
    actions: Mutex<Vec<String>>,
    last_target: Mutex<Option<Target>>,
}

impl FixedEnforcer {
    pub fn new(decision: bool) -> Self {
        Self {
            decision,
            actions: Mutex::new(Vec::new()),
            last_target: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.actions.lock().len()
    }

    pub fn actions(&self) -> Vec<String> {
        self.actions.lock().clone()
    }

    pub fn last_target(&self) -> Option<Target> {
        self.last_target.lock().clone()
    }
}

#[async_trait]
impl Enforcer for FixedEnforcer {
    async fn enforce(
        &self,
        action: &str,
        target: &Target,
        _credentials: &Credentials,
    ) -> Result<bool, EngineError> {
        self.actions.lock().push(action.to_owned());
        *self.last_target.lock() = Some(target.clone());
        Ok(self.decision)
    }
}

/// Allows an action when the credentials carry the role the action maps to.
/// Unknown actions are denied.
pub struct RoleEnforcer {
    required: HashMap<String, String>,
}

impl RoleEnforcer {
    pub fn new<const N: usize>(rules: [(&str, &str); N]) -> Self {
        Self {
            required: rules
                .into_iter()
                .map(|(action, role)| (action.to_owned(), role.to_owned()))
                .collect(),
        }
    }
}

#[async_trait]
impl Enforcer for RoleEnforcer {
    async fn enforce(
        &self,
        action: &str,
        _target: &Target,
        credentials: &Credentials,
    ) -> Result<bool, EngineError> {
        Ok(self
            .required
            .get(action)
            .is_some_and(|role| credentials.roles.iter().any(|r| r == role)))
    }
}

/// Must never be reached.
pub struct PanickingEnforcer;

#[async_trait]
impl Enforcer for PanickingEnforcer {
    async fn enforce(
        &self,
        action: &str,
        _target: &Target,
        _credentials: &Credentials,
    ) -> Result<bool, EngineError> {
        panic!("enforce must not be called after a denial (action: {action})");
    }
}

pub struct FailingEnforcer;

#[async_trait]
impl Enforcer for FailingEnforcer {
    async fn enforce(
        &self,
        _action: &str,
        _target: &Target,
        _credentials: &Credentials,
    ) -> Result<bool, EngineError> {
        Err(EngineError::Evaluation("rule references unknown check".to_owned()))
    }
}

/// Wraps a user and counts how often its roles are read.
pub struct CountingUser {
    inner: SessionUser,
    role_reads: AtomicUsize,
}

impl CountingUser {
    pub fn new(inner: SessionUser) -> Self {
        Self {
            inner,
            role_reads: AtomicUsize::new(0),
        }
    }

    pub fn role_reads(&self) -> usize {
        self.role_reads.load(Ordering::SeqCst)
    }
}

impl AuthenticatedUser for CountingUser {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn token(&self) -> &SecretString {
        self.inner.token()
    }

    fn username(&self) -> &str {
        self.inner.username()
    }

    fn project_id(&self) -> Option<&str> {
        self.inner.project_id()
    }

    fn project_name(&self) -> Option<&str> {
        self.inner.project_name()
    }

    fn user_domain_id(&self) -> Option<&str> {
        self.inner.user_domain_id()
    }

    fn is_superuser(&self) -> bool {
        self.inner.is_superuser()
    }

    fn roles(&self) -> &[Role] {
        self.role_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.roles()
    }
}

/// Temporary policy directory.
pub struct PolicyDir {
    dir: TempDir,
}

impl PolicyDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp policy dir"),
        }
    }

    pub fn with_file(self, name: &str) -> Self {
        std::fs::write(self.dir.path().join(name), "# test policy\n").expect("write policy file");
        self
    }

    pub fn config(&self, files: &[(&str, &str)]) -> PolicyEnforcerConfig {
        PolicyEnforcerConfig {
            policy_files_path: self.dir.path().to_path_buf(),
            policy_files: files
                .iter()
                .map(|(scope, file)| ((*scope).to_owned(), PathBuf::from(file)))
                .collect(),
            ..PolicyEnforcerConfig::default()
        }
    }
}
