// ABOUTME: Configuration types and parsing for gosu.yml.
// ABOUTME: Handles YAML parsing, discovery and credential resolution.

mod env_value;
mod github;
mod helm;
mod init;
mod jenkins;

pub use env_value::{EnvValue, resolve_setting};
pub use github::{DEFAULT_STATUS_CONTEXT, GithubConfig};
pub use helm::HelmConfig;
pub use init::init_config;
pub use jenkins::{DEFAULT_DIGEST_ACTION, JenkinsConfig};

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "gosu.yml";
pub const CONFIG_FILENAME_ALT: &str = "gosu.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".gosu/config.yml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub github: GithubConfig,

    #[serde(default)]
    pub jenkins: JenkinsConfig,

    #[serde(default)]
    pub helm: HelmConfig,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!("Loading configuration from {}", path.display());
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Like `discover`, but an absent file yields the default configuration.
    ///
    /// Missing credentials are reported later, only by the lookups that need them.
    pub fn discover_or_default(dir: &Path) -> Result<Self> {
        match Self::discover(dir) {
            Err(Error::ConfigNotFound(_)) => {
                tracing::debug!("No configuration file in {}, using defaults", dir.display());
                Ok(Config::default())
            }
            other => other,
        }
    }
}

/// A username and password (or token) pair for HTTP basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
