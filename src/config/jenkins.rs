// ABOUTME: Jenkins section of the configuration.
// ABOUTME: API credentials, the digest-publishing action class and digest wait timing.

use serde::Deserialize;
use std::time::Duration;

use super::Credentials;
use super::env_value::{EnvValue, resolve_setting};

pub const DEFAULT_DIGEST_ACTION: &str =
    "org.jenkinsci.plugins.custombuildproperties.CustomBuildPropertiesAction";

#[derive(Debug, Clone, Deserialize)]
pub struct JenkinsConfig {
    #[serde(default)]
    pub username: Option<EnvValue>,

    #[serde(default)]
    pub password: Option<EnvValue>,

    /// `_class` of the build action whose `properties.digest` holds the artifact digest.
    #[serde(default = "default_digest_action")]
    pub digest_action: String,

    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,

    /// Give up waiting for a digest after this long. Unset waits forever.
    #[serde(default, with = "humantime_serde")]
    pub wait_timeout: Option<Duration>,
}

fn default_digest_action() -> String {
    DEFAULT_DIGEST_ACTION.to_string()
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(5)
}

impl Default for JenkinsConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            digest_action: default_digest_action(),
            poll_interval: default_poll_interval(),
            wait_timeout: None,
        }
    }
}

impl JenkinsConfig {
    /// Basic-auth credentials when both halves are configured.
    pub fn credentials(&self) -> Option<Credentials> {
        let username = resolve_setting(self.username.as_ref())?;
        let password = resolve_setting(self.password.as_ref())?;
        Some(Credentials::new(username, password))
    }
}
