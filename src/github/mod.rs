// ABOUTME: GitHub combined commit status lookup.
// ABOUTME: Finds the status entry reported by the CI server for a commit.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::config::GithubConfig;
use crate::error::{Error, Result};
use crate::git::Git;
use crate::output::Output;
use crate::process::CommandRunner;
use crate::types::{CommitSha, RepoSlug};

const USER_AGENT: &str = concat!("gosu-tasks/", env!("CARGO_PKG_VERSION"));

/// Every status reported for one commit.
#[derive(Debug, Clone, Deserialize)]
pub struct CombinedStatus {
    pub state: String,
    #[serde(default)]
    pub statuses: Vec<CommitStatus>,
}

/// One context's status for a commit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommitStatus {
    pub context: String,
    pub state: String,
    #[serde(default)]
    pub target_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CommitStatus {
    /// Link to the build page; required for digest lookups.
    pub fn target_url(&self) -> Result<&str> {
        self.target_url
            .as_deref()
            .ok_or_else(|| Error::MissingTargetUrl {
                context: self.context.clone(),
            })
    }
}

impl CombinedStatus {
    /// The status reported under `context`, if any.
    pub fn find(&self, context: &str) -> Option<&CommitStatus> {
        self.statuses.iter().find(|s| s.context == context)
    }
}

/// Pick the status for `context`, or fail with `BuildNotFound`.
pub fn select_status(
    combined: CombinedStatus,
    repo: &RepoSlug,
    commit: &CommitSha,
    context: &str,
) -> Result<CommitStatus> {
    combined
        .find(context)
        .cloned()
        .ok_or_else(|| Error::BuildNotFound {
            repo: repo.to_string(),
            commit: commit.to_string(),
            context: context.to_string(),
        })
}

/// Resolves the CI status of a commit.
#[async_trait]
pub trait StatusLookup: Send + Sync {
    async fn commit_status(&self, commit: &CommitSha, repo: &RepoSlug) -> Result<CommitStatus>;
}

/// GitHub REST client for commit statuses.
pub struct GithubClient {
    http: reqwest::Client,
    config: GithubConfig,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    pub fn status_url(&self, commit: &CommitSha, repo: &RepoSlug) -> String {
        format!(
            "{}/repos/{}/commits/{}/status?per_page=100",
            self.config.api_url(),
            repo,
            commit
        )
    }

    /// Fetch the combined status for `commit` in `repo`.
    ///
    /// Fails with `MissingCredentials` before any request when the username or
    /// password is not configured.
    pub async fn combined_status(
        &self,
        commit: &CommitSha,
        repo: &RepoSlug,
    ) -> Result<CombinedStatus> {
        let credentials = self.config.credentials()?;
        let url = self.status_url(commit, repo);

        tracing::debug!("Checking commit status for {}:{}", repo, commit);

        let combined = self
            .http
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .basic_auth(&credentials.username, Some(&credentials.password))
            .send()
            .await?
            .error_for_status()?
            .json::<CombinedStatus>()
            .await?;

        tracing::debug!(
            "Combined state {} with {} status(es)",
            combined.state,
            combined.statuses.len()
        );

        Ok(combined)
    }
}

/// Look up the CI status of `commit`.
///
/// Credentials are checked before the repository is resolved, so a missing
/// token is reported ahead of any git failure. Without `repo`, the slug comes
/// from the `origin` remote.
pub async fn lookup_status<R, S>(
    config: &GithubConfig,
    git: &Git<'_, R>,
    statuses: &S,
    commit: &CommitSha,
    repo: Option<&RepoSlug>,
    output: &Output,
) -> Result<CommitStatus>
where
    R: CommandRunner + ?Sized,
    S: StatusLookup + ?Sized,
{
    config.credentials()?;

    let repo = match repo {
        Some(repo) => repo.clone(),
        None => git.repo_slug(&config.host).await?,
    };

    output.progress(&format!("  → Looking up CI status for {repo}@{commit}..."));
    statuses.commit_status(commit, &repo).await
}

#[async_trait]
impl StatusLookup for GithubClient {
    async fn commit_status(&self, commit: &CommitSha, repo: &RepoSlug) -> Result<CommitStatus> {
        let combined = self.combined_status(commit, repo).await?;
        select_status(combined, repo, commit, &self.config.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_STATUS_CONTEXT, EnvValue};

    fn fixture() -> CombinedStatus {
        serde_json::from_str(
            r#"{
              "state": "pending",
              "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
              "statuses": [
                {
                  "context": "security/snyk",
                  "state": "success",
                  "target_url": "https://snyk.example/test",
                  "description": null
                },
                {
                  "context": "continuous-integration/jenkins/branch",
                  "state": "pending",
                  "target_url": "https://ci.example/job/widgets/job/main/12/display/redirect",
                  "description": "This commit is being built"
                }
              ]
            }"#,
        )
        .unwrap()
    }

    fn ids() -> (RepoSlug, CommitSha) {
        (
            RepoSlug::parse("acme/widgets").unwrap(),
            CommitSha::new("6dcb09b5b57875f334f61aebed695e2e4193db5e").unwrap(),
        )
    }

    #[test]
    fn selects_ci_context() {
        let (repo, commit) = ids();
        let status = select_status(fixture(), &repo, &commit, DEFAULT_STATUS_CONTEXT).unwrap();
        assert_eq!(status.state, "pending");
        assert_eq!(
            status.target_url().unwrap(),
            "https://ci.example/job/widgets/job/main/12/display/redirect"
        );
    }

    #[test]
    fn unrelated_contexts_are_build_not_found() {
        let (repo, commit) = ids();
        let mut combined = fixture();
        combined.statuses.retain(|s| s.context != DEFAULT_STATUS_CONTEXT);

        let err = select_status(combined, &repo, &commit, DEFAULT_STATUS_CONTEXT).unwrap_err();
        match err {
            Error::BuildNotFound { repo, context, .. } => {
                assert_eq!(repo, "acme/widgets");
                assert_eq!(context, DEFAULT_STATUS_CONTEXT);
            }
            other => panic!("expected BuildNotFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_target_url_is_reported() {
        let status = CommitStatus {
            context: "ci".to_string(),
            state: "pending".to_string(),
            target_url: None,
            description: None,
        };
        assert!(matches!(
            status.target_url(),
            Err(Error::MissingTargetUrl { .. })
        ));
    }

    #[test]
    fn status_url_uses_configured_api() {
        let config = GithubConfig {
            api_url: Some("https://ghe.example/api/v3/".to_string()),
            ..GithubConfig::default()
        };
        let client = GithubClient::new(&config).unwrap();
        let (repo, commit) = ids();
        assert_eq!(
            client.status_url(&commit, &repo),
            "https://ghe.example/api/v3/repos/acme/widgets/commits/6dcb09b5b57875f334f61aebed695e2e4193db5e/status?per_page=100"
        );
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_request() {
        let config = GithubConfig {
            username: Some(EnvValue::Literal("octocat".to_string())),
            password: None,
            // Unroutable, so a request would fail with Http rather than MissingCredentials.
            api_url: Some("http://127.0.0.1:9".to_string()),
            ..GithubConfig::default()
        };
        let client = GithubClient::new(&config).unwrap();
        let (repo, commit) = ids();

        let err = client.commit_status(&commit, &repo).await.unwrap_err();
        assert!(matches!(
            err,
            Error::MissingCredentials { service: "github" }
        ));
    }
}
