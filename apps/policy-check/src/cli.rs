use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use policy_enforcer_sdk::{Credentials, ScopedAction, Target};
use secrecy::SecretString;

#[derive(Parser, Debug)]
#[command(name = "policy-check")]
#[command(about = "Check (scope, action) pairs for a user against per-service policy files")]
#[command(version)]
pub struct Args {
    /// Policy enforcer configuration (YAML). `POLICY_ENFORCER__*` variables override it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rule engine evaluating the policy files
    #[arg(long, value_enum, default_value_t = EngineKind::Casbin)]
    pub engine: EngineKind,

    /// Casbin model file; the embedded RBAC model is used when omitted
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// User ID
    #[arg(long)]
    pub user_id: String,

    /// User name
    #[arg(long, default_value = "")]
    pub username: String,

    /// Session token
    #[arg(long, default_value = "")]
    pub token: String,

    /// Project ID the user is scoped to
    #[arg(long)]
    pub project_id: Option<String>,

    /// Project name the user is scoped to
    #[arg(long)]
    pub project_name: Option<String>,

    /// Domain of the user
    #[arg(long)]
    pub domain_id: Option<String>,

    /// Role name, repeatable
    #[arg(long = "role")]
    pub roles: Vec<String>,

    /// Treat the user as a superuser
    #[arg(long)]
    pub admin: bool,

    /// Target attribute as `key=value`, repeatable. JSON values are parsed.
    #[arg(long = "target", value_parser = parse_target_pair)]
    pub target: Vec<(String, serde_json::Value)>,

    /// Checks as `scope/action`, evaluated in order
    #[arg(required = true, value_parser = parse_scoped_action)]
    pub checks: Vec<ScopedAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineKind {
    Casbin,
    AllowAll,
    DenyAll,
}

impl Args {
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            user_id: self.user_id.clone(),
            token: SecretString::from(self.token.clone()),
            username: self.username.clone(),
            project_id: self.project_id.clone(),
            project_name: self.project_name.clone(),
            domain_id: self.domain_id.clone(),
            is_admin: self.admin,
            roles: self.roles.clone(),
        }
    }

    #[must_use]
    pub fn target(&self) -> Target {
        self.target.iter().cloned().collect()
    }
}

fn parse_scoped_action(s: &str) -> Result<ScopedAction, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_target_pair(s: &str) -> anyhow::Result<(String, serde_json::Value)> {
    let (key, raw) = s
        .split_once('=')
        .with_context(|| format!("expected key=value, got '{s}'"))?;
    anyhow::ensure!(!key.is_empty(), "empty target key in '{s}'");
    let value = serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::from(raw));
    Ok((key.to_owned(), value))
}
