// ABOUTME: Jenkins build digest lookup.
// ABOUTME: Reads the artifact digest a build publishes through its custom build properties.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::config::{Credentials, JenkinsConfig};
use crate::error::Result;
use crate::github::CommitStatus;

const REDIRECT_SEGMENT: &str = "/display/redirect";
const API_SEGMENT: &str = "/api/json";

/// Digest published by a build, if any, and the build page it came from.
///
/// `digest == None` means the build has not published one yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDigest {
    pub digest: Option<String>,
    pub url: String,
}

impl BuildDigest {
    pub fn is_ready(&self) -> bool {
        self.digest.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct BuildInfo {
    #[serde(default)]
    actions: Vec<Value>,
}

/// JSON API URL for the build behind a status target URL.
pub fn api_url(target_url: &str) -> String {
    target_url.replace(REDIRECT_SEGMENT, API_SEGMENT)
}

/// `properties.digest` of the first action whose `_class` is `action_class`.
pub fn extract_digest(actions: &[Value], action_class: &str) -> Option<String> {
    actions
        .iter()
        .filter(|action| action.get("_class").and_then(Value::as_str) == Some(action_class))
        .find_map(|action| action.pointer("/properties/digest").and_then(Value::as_str))
        .map(str::to_string)
}

/// Resolves the artifact digest of the build behind a commit status.
#[async_trait]
pub trait DigestLookup: Send + Sync {
    async fn build_digest(&self, status: &CommitStatus) -> Result<BuildDigest>;
}

/// Jenkins JSON API client.
pub struct JenkinsClient {
    http: reqwest::Client,
    credentials: Option<Credentials>,
    digest_action: String,
}

impl JenkinsClient {
    pub fn new(config: &JenkinsConfig) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            credentials: config.credentials(),
            digest_action: config.digest_action.clone(),
        })
    }
}

#[async_trait]
impl DigestLookup for JenkinsClient {
    async fn build_digest(&self, status: &CommitStatus) -> Result<BuildDigest> {
        let target_url = status.target_url()?;
        let url = api_url(target_url);

        tracing::debug!("Fetching build info from {}", url);

        let mut request = self.http.get(&url);
        if let Some(ref credentials) = self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let info = request
            .send()
            .await?
            .error_for_status()?
            .json::<BuildInfo>()
            .await?;

        let digest = extract_digest(&info.actions, &self.digest_action);
        if digest.is_none() {
            tracing::debug!("No {} action on {}", self.digest_action, url);
        }

        Ok(BuildDigest {
            digest,
            url: target_url.to_string(),
        })
    }
}
