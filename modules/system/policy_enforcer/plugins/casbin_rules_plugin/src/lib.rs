//! Casbin rules plugin for the policy enforcer.
//!
//! Evaluates per-scope policy files with an RBAC model where a policy line
//! grants an action pattern to a subject (`user:<id>`, `role:<name>` or
//! `admin`). Policies load lazily on the first check against a scope.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod model;

pub use config::CasbinRulesPluginConfig;
pub use domain::{CasbinEnforcer, ModelSource, Service as CasbinRuleEngine};
pub use model::{casbin_model_string, subjects};
