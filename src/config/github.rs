// ABOUTME: GitHub section of the configuration.
// ABOUTME: Credentials, host and the commit status context that identifies the CI build.

use serde::Deserialize;

use super::Credentials;
use super::env_value::{EnvValue, resolve_setting};
use crate::error::{Error, Result};
use crate::types::DEFAULT_HOST;

pub const DEFAULT_STATUS_CONTEXT: &str = "continuous-integration/jenkins/branch";

#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    #[serde(default)]
    pub username: Option<EnvValue>,

    /// Password or personal access token.
    #[serde(default)]
    pub password: Option<EnvValue>,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub api_url: Option<String>,

    #[serde(default = "default_context")]
    pub context: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_context() -> String {
    DEFAULT_STATUS_CONTEXT.to_string()
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            host: default_host(),
            api_url: None,
            context: default_context(),
        }
    }
}

impl GithubConfig {
    /// Both username and password, or `MissingCredentials`.
    pub fn credentials(&self) -> Result<Credentials> {
        let username = resolve_setting(self.username.as_ref());
        let password = resolve_setting(self.password.as_ref());

        match (username, password) {
            (Some(username), Some(password)) => Ok(Credentials::new(username, password)),
            _ => Err(Error::MissingCredentials { service: "github" }),
        }
    }

    /// REST API root: api.github.com for the public host, `/api/v3` on Enterprise.
    pub fn api_url(&self) -> String {
        match self.api_url {
            Some(ref url) => url.trim_end_matches('/').to_string(),
            None if self.host == DEFAULT_HOST => "https://api.github.com".to_string(),
            None => format!("https://{}/api/v3", self.host),
        }
    }
}
