// ABOUTME: Release invoker: resolves a digest and deploys it with helm.
// ABOUTME: Digest precedence is explicit argument, DIGEST override, then the CI lookup.

mod helm;
mod values;

pub use helm::{HELM, HelmUpgrade};
pub use values::{ReleaseMetadata, ReleaseValues};

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::ci_env::CiEnvironment;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::git::Git;
use crate::github::{CommitStatus, StatusLookup, lookup_status};
use crate::jenkins::DigestLookup;
use crate::output::Output;
use crate::process::CommandRunner;
use crate::types::{CommitSha, RepoSlug};

/// What the operator asked to deploy.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub namespace: Option<String>,
    pub digest: Option<String>,
    /// Block until the build publishes a digest instead of failing.
    pub wait: bool,
    /// Repository to query statuses for; defaults to the `origin` remote.
    pub repo: Option<RepoSlug>,
}

impl Default for DeployRequest {
    fn default() -> Self {
        Self {
            namespace: None,
            digest: None,
            wait: true,
            repo: None,
        }
    }
}

/// How the digest wait loop paces itself.
#[derive(Debug, Clone, Copy)]
pub struct WaitPolicy {
    pub wait: bool,
    pub interval: Duration,
    pub timeout: Option<Duration>,
}

/// Poll `digests` until the build behind `status` publishes a digest.
///
/// With `wait` off, a missing digest fails after a single lookup.
pub async fn wait_for_digest<D: DigestLookup + ?Sized>(
    digests: &D,
    status: &CommitStatus,
    policy: WaitPolicy,
    output: &Output,
) -> Result<String> {
    let started = Instant::now();
    let mut announced = false;

    loop {
        let build = digests.build_digest(status).await?;
        if let Some(digest) = build.digest {
            tracing::debug!("Digest {} published by {}", digest, build.url);
            return Ok(digest);
        }

        if !policy.wait {
            return Err(Error::BuildInProgress { url: build.url });
        }

        if let Some(timeout) = policy.timeout
            && started.elapsed() >= timeout
        {
            return Err(Error::WaitTimeout {
                url: build.url,
                waited: started.elapsed(),
            });
        }

        if !announced {
            output.progress(&format!("  → Waiting for {} to publish a digest...", build.url));
            announced = true;
        }
        tracing::info!("No digest yet from {}, polling again", build.url);
        tokio::time::sleep(policy.interval).await;
    }
}

/// Runs the deploy flow against one working copy.
pub struct Deploy<'a, R, S, D>
where
    R: CommandRunner + ?Sized,
    S: StatusLookup + ?Sized,
    D: DigestLookup + ?Sized,
{
    config: &'a Config,
    runner: &'a R,
    overrides: &'a CiEnvironment,
    statuses: &'a S,
    digests: &'a D,
    output: &'a Output,
    dir: Option<PathBuf>,
}

impl<'a, R, S, D> Deploy<'a, R, S, D>
where
    R: CommandRunner + ?Sized,
    S: StatusLookup + ?Sized,
    D: DigestLookup + ?Sized,
{
    pub fn new(
        config: &'a Config,
        runner: &'a R,
        overrides: &'a CiEnvironment,
        statuses: &'a S,
        digests: &'a D,
        output: &'a Output,
    ) -> Self {
        Self {
            config,
            runner,
            overrides,
            statuses,
            digests,
            output,
            dir: None,
        }
    }

    /// Run git and helm in `dir` instead of the process working directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    fn git(&self) -> Git<'a, R> {
        let git = Git::new(self.runner, self.overrides);
        match self.dir {
            Some(ref dir) => git.in_dir(dir.clone()),
            None => git,
        }
    }

    /// Resolve the digest to deploy for `commit`.
    ///
    /// Only the CI lookup path touches GitHub and Jenkins, so explicit digests
    /// work without credentials. That path checks credentials before git.
    pub async fn resolve_digest(&self, commit: &CommitSha, request: &DeployRequest) -> Result<String> {
        if let Some(digest) = request.digest.as_deref().filter(|d| !d.is_empty()) {
            tracing::debug!("Using digest from command line");
            return Ok(digest.to_string());
        }

        if let Some(ref digest) = self.overrides.digest {
            tracing::debug!("Using digest from environment");
            return Ok(digest.clone());
        }

        let status = lookup_status(
            &self.config.github,
            &self.git(),
            self.statuses,
            commit,
            request.repo.as_ref(),
            self.output,
        )
        .await?;

        let policy = WaitPolicy {
            wait: request.wait,
            interval: self.config.jenkins.poll_interval,
            timeout: self.config.jenkins.wait_timeout,
        };
        wait_for_digest(self.digests, &status, policy, self.output).await
    }

    /// Resolve everything needed for the helm invocation without running it.
    pub async fn plan(&self, request: &DeployRequest) -> Result<HelmUpgrade> {
        let namespace = self
            .config
            .helm
            .namespace(request.namespace.as_deref())
            .map(str::to_string);
        let release = self.config.helm.release_name(namespace.as_deref())?;

        let git = self.git();
        let commit = git.current_commit().await?;
        let digest = self.resolve_digest(&commit, request).await?;

        let metadata = ReleaseMetadata {
            branch: git.current_branch().await?,
            message: git.commit_message().await?,
            author: git.commit_author().await?,
            owner: git.deployer().await?,
            commit,
            digest,
        };

        Ok(HelmUpgrade {
            namespace,
            release,
            chart: self.config.helm.chart.clone(),
            values: metadata.values(),
        })
    }

    /// Plan, echo and execute the helm upgrade.
    pub async fn run(&self, request: &DeployRequest) -> Result<HelmUpgrade> {
        let upgrade = self.plan(request).await?;

        self.output.command(&upgrade.to_string());

        let mut spec = upgrade.to_spec();
        if let Some(ref dir) = self.dir {
            spec = spec.current_dir(dir);
        }
        self.runner.status(&spec).await?;

        Ok(upgrade)
    }
}
