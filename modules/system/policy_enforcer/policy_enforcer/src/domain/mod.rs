//! Domain layer for the policy enforcer.

pub mod checker;
pub mod credentials;
pub mod registry;

pub use checker::AccessChecker;
pub use credentials::{CredentialAdapter, CredentialKey};
pub use registry::{EnforcerRegistry, ScopeEnforcers};
