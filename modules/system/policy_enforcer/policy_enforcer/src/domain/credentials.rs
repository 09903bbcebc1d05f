//! Credential adapter: authenticated user -> flat credential record.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use policy_enforcer_sdk::{AuthenticatedUser, Credentials};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

/// Session identity a credential record is cached under.
///
/// The token is kept only as a digest so raw tokens never become map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialKey {
    user_id: String,
    token_digest: [u8; 32],
}

impl CredentialKey {
    #[must_use]
    pub fn for_user(user: &dyn AuthenticatedUser) -> Self {
        let digest = Sha256::digest(user.token().expose_secret().as_bytes());
        let mut token_digest = [0u8; 32];
        token_digest.copy_from_slice(&digest);
        Self {
            user_id: user.id().to_owned(),
            token_digest,
        }
    }
}

/// Builds credential records and memoizes them per session.
///
/// A record is built at most once per [`CredentialKey`] while it stays in the
/// cache. Changes to the user's roles after the first build are not picked
/// up until the entry is evicted or [`forget`](Self::forget) is called.
pub struct CredentialAdapter {
    cache: Mutex<LruCache<CredentialKey, Arc<Credentials>>>,
}

impl CredentialAdapter {
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Return the cached record for the user's session, building it on first use.
    #[must_use]
    pub fn to_credentials(&self, user: &dyn AuthenticatedUser) -> Arc<Credentials> {
        let key = CredentialKey::for_user(user);
        if let Some(cached) = self.cache.lock().get(&key) {
            return Arc::clone(cached);
        }

        let credentials = Arc::new(build_credentials(user));
        self.cache.lock().put(key, Arc::clone(&credentials));
        credentials
    }

    /// Drop the cached record for the user's session. Returns whether one was cached.
    pub fn forget(&self, user: &dyn AuthenticatedUser) -> bool {
        self.cache
            .lock()
            .pop(&CredentialKey::for_user(user))
            .is_some()
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }
}

impl std::fmt::Debug for CredentialAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cache = self.cache.lock();
        f.debug_struct("CredentialAdapter")
            .field("cached", &cache.len())
            .field("capacity", &cache.cap())
            .finish()
    }
}

fn build_credentials(user: &dyn AuthenticatedUser) -> Credentials {
    Credentials {
        user_id: user.id().to_owned(),
        token: SecretString::from(user.token().expose_secret().to_owned()),
        username: user.username().to_owned(),
        project_id: user.project_id().map(ToOwned::to_owned),
        project_name: user.project_name().map(ToOwned::to_owned),
        domain_id: user.user_domain_id().map(ToOwned::to_owned),
        is_admin: user.is_superuser(),
        roles: user.roles().iter().map(|role| role.name.clone()).collect(),
    }
}
