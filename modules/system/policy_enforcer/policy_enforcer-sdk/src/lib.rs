//! Policy Enforcer SDK
//!
//! This crate provides the public contracts for the `policy_enforcer` module:
//!
//! - [`RuleEngine`], [`Enforcer`] - Seam to the external rule-evaluation engine
//! - [`AuthenticatedUser`], [`UserResolver`] - Seam to the authentication layer
//! - [`Credentials`] - Flat attribute record handed to the engine
//! - [`ScopedAction`], [`Target`], [`Principal`] - Check request models
//! - [`PolicyError`], [`EngineError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use policy_enforcer_sdk::{Principal, ScopedAction, Target};
//!
//! let allowed = checker
//!     .check(
//!         &[ScopedAction::new("compute", "compute:create_instance")],
//!         Principal::User(&user),
//!         &Target::new(),
//!     )
//!     .await?;
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod user;

// Re-export main types at crate root
pub use api::{Enforcer, RuleEngine};
pub use error::{EngineError, ParseScopedActionError, PolicyError};
pub use models::{Credentials, Principal, ScopedAction, Target};
pub use user::{AuthenticatedUser, ExtensionUserResolver, Role, SessionUser, UserResolver};
