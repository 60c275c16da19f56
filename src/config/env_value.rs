// ABOUTME: Configuration value types with environment interpolation.
// ABOUTME: Handles literal values and references to environment variables.

use crate::error::{Error, Result};
use serde::Deserialize;

/// A configured string that is either written inline or read from the environment.
///
/// ```yaml
/// password: hunter2
/// password: { env: GITHUB_TOKEN }
/// password: { env: GITHUB_TOKEN, default: "" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    pub fn resolve(&self) -> Result<String> {
        match self {
            EnvValue::Literal(s) => Ok(s.clone()),
            EnvValue::FromEnv { var, default } => match std::env::var(var) {
                Ok(val) => Ok(val),
                Err(_) => default
                    .clone()
                    .ok_or_else(|| Error::MissingEnvVar(var.clone())),
            },
        }
    }
}

/// Resolve an optional setting, treating unset and empty values alike.
pub fn resolve_setting(value: Option<&EnvValue>) -> Option<String> {
    value
        .and_then(|v| v.resolve().ok())
        .filter(|resolved| !resolved.is_empty())
}
