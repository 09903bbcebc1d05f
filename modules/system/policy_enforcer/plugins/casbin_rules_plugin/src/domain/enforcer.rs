//! Casbin-backed enforcer for a single policy file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use casbin::{CoreApi, DefaultModel, FileAdapter};
use policy_enforcer_sdk::{Credentials, EngineError, Enforcer, Target};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::model::{casbin_model_string, subjects};

/// Where the Casbin model comes from.
#[derive(Debug, Clone)]
pub enum ModelSource {
    Embedded,
    File(PathBuf),
}

/// Enforcer bound to one Casbin policy file.
///
/// The model and policy are loaded on the first [`enforce`](Enforcer::enforce)
/// call. A failed load is not cached; the next call tries again.
pub struct CasbinEnforcer {
    policy_path: PathBuf,
    model: Arc<ModelSource>,
    inner: OnceCell<casbin::Enforcer>,
}

impl CasbinEnforcer {
    #[must_use]
    pub fn new(policy_path: PathBuf, model: Arc<ModelSource>) -> Self {
        Self {
            policy_path,
            model,
            inner: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn policy_path(&self) -> &Path {
        &self.policy_path
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.inner.initialized()
    }

    async fn load(&self) -> Result<casbin::Enforcer, EngineError> {
        let model = match self.model.as_ref() {
            ModelSource::Embedded => DefaultModel::from_str(casbin_model_string()).await,
            ModelSource::File(path) => DefaultModel::from_file(path).await,
        }
        .map_err(|e| self.load_error(&e))?;

        let adapter = FileAdapter::new(self.policy_path.clone());
        let enforcer = casbin::Enforcer::new(model, adapter)
            .await
            .map_err(|e| self.load_error(&e))?;

        debug!(path = %self.policy_path.display(), "loaded casbin policy");
        Ok(enforcer)
    }

    fn load_error(&self, e: &casbin::Error) -> EngineError {
        EngineError::Load {
            path: self.policy_path.clone(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl Enforcer for CasbinEnforcer {
    async fn enforce(
        &self,
        action: &str,
        _target: &Target,
        credentials: &Credentials,
    ) -> Result<bool, EngineError> {
        let enforcer = self.inner.get_or_try_init(|| self.load()).await?;

        for subject in subjects(credentials) {
            let allowed = enforcer
                .enforce((subject.as_str(), action))
                .map_err(|e| EngineError::Evaluation(e.to_string()))?;
            if allowed {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl std::fmt::Debug for CasbinEnforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CasbinEnforcer")
            .field("policy_path", &self.policy_path)
            .field("model", &self.model)
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}
