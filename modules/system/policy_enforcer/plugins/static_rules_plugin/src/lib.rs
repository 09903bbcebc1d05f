//! Static rules plugin for the policy enforcer.
//!
//! Returns the same decision for every action regardless of policy file
//! contents. Intended for development and tests.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::{RulesMode, StaticRulesPluginConfig};
pub use domain::{Service as StaticRuleEngine, StaticEnforcer};
