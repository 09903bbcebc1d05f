//! Policy enforcer module.
//!
//! Loads one enforcer per service scope from a mapping of scope to policy
//! file and answers ordered (scope, action) checks for an authenticated user.
//! Rule evaluation itself is delegated to a [`RuleEngine`] plugin.
//!
//! - [`EnforcerRegistry`] - lazily built scope -> enforcer mapping
//! - [`CredentialAdapter`] - user -> credential record, cached per session
//! - [`AccessChecker`] - short-circuiting ordered check, the entry point
//!
//! [`RuleEngine`]: policy_enforcer_sdk::RuleEngine
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

#[cfg(test)]
mod test_support;

pub use config::PolicyEnforcerConfig;
pub use domain::{AccessChecker, CredentialAdapter, CredentialKey, EnforcerRegistry};
