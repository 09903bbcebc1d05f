//! `policy-check`: evaluate ordered (scope, action) checks from the command line.
//!
//! Exits with 0 when every check is allowed, 1 when one is denied and 2 on
//! configuration or rule engine errors.

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context as _;
use casbin_rules_plugin::{CasbinRuleEngine, CasbinRulesPluginConfig};
use clap::Parser;
use cli::{Args, EngineKind};
use policy_enforcer::{AccessChecker, PolicyEnforcerConfig};
use policy_enforcer_sdk::{ExtensionUserResolver, Principal, RuleEngine};
use static_rules_plugin::{RulesMode, StaticRuleEngine, StaticRulesPluginConfig};
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let result = run(&args).await;
    match &result {
        Ok(true) => println!("allowed"),
        Ok(false) => println!("denied"),
        Err(e) => eprintln!("error: {e:#}"),
    }
    ExitCode::from(exit_status(&result))
}

fn exit_status(result: &anyhow::Result<bool>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

async fn run(args: &Args) -> anyhow::Result<bool> {
    let config = PolicyEnforcerConfig::load(args.config.as_deref())?;
    info!(
        base = %config.policy_files_path.display(),
        scopes = config.policy_files.len(),
        engine = ?args.engine,
        "policy enforcer configured"
    );

    let checker = AccessChecker::new(config, engine(args), Arc::new(ExtensionUserResolver));
    let credentials = Arc::new(args.credentials());

    checker
        .check(
            &args.checks,
            Principal::Credentials(credentials),
            &args.target(),
        )
        .await
        .context("policy evaluation failed")
}

fn engine(args: &Args) -> Arc<dyn RuleEngine> {
    match args.engine {
        EngineKind::Casbin => Arc::new(CasbinRuleEngine::new(&CasbinRulesPluginConfig {
            model_path: args.model.clone(),
        })),
        EngineKind::AllowAll => static_engine(RulesMode::AllowAll),
        EngineKind::DenyAll => static_engine(RulesMode::DenyAll),
    }
}

fn static_engine(mode: RulesMode) -> Arc<dyn RuleEngine> {
    Arc::new(StaticRuleEngine::new(&StaticRulesPluginConfig { mode }))
}
