//! Configuration for the policy enforcer.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::Deserialize;

/// Prefix of environment variables overriding file configuration.
/// Nested keys are separated by a double underscore, e.g.
/// `POLICY_ENFORCER__POLICY_FILES__COMPUTE=nova_policy.csv`.
/// Keys are lowercased, so scopes with uppercase letters cannot be set this way.
pub const ENV_PREFIX: &str = "POLICY_ENFORCER__";

const DEFAULT_CREDENTIAL_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(n) => n,
    None => unreachable!(),
};

/// Module configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyEnforcerConfig {
    /// Base directory the per-scope policy file paths are relative to.
    pub policy_files_path: PathBuf,

    /// Policy file per service scope, relative to `policy_files_path`.
    pub policy_files: BTreeMap<String, PathBuf>,

    /// Maximum number of cached credential records.
    pub credential_cache_capacity: NonZeroUsize,
}

impl Default for PolicyEnforcerConfig {
    fn default() -> Self {
        Self {
            policy_files_path: PathBuf::new(),
            policy_files: BTreeMap::new(),
            credential_cache_capacity: DEFAULT_CREDENTIAL_CACHE_CAPACITY,
        }
    }
}

impl PolicyEnforcerConfig {
    /// Load configuration from an optional YAML file, then apply
    /// `POLICY_ENFORCER__*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the merged
    /// configuration does not deserialize.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            anyhow::ensure!(
                path.is_file(),
                "policy enforcer configuration file {} not found",
                path.display()
            );
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load policy enforcer configuration")
    }

    /// Absolute (or working-directory relative) path of a scope's policy file.
    #[must_use]
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.policy_files_path.join(relative)
    }
}
