// ABOUTME: Read-only accessors for the local git working copy.
// ABOUTME: Commit, branch, message, author and remote, with CI runner overrides.

use std::path::PathBuf;

use crate::ci_env::CiEnvironment;
use crate::error::{Error, Result};
use crate::process::{CommandRunner, CommandSpec};
use crate::types::{CommitSha, RepoSlug};

const REMOTE: &str = "origin";

/// Author of the latest commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

/// Runs git against one working copy.
pub struct Git<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    overrides: &'a CiEnvironment,
    dir: Option<PathBuf>,
}

impl<'a, R: CommandRunner + ?Sized> Git<'a, R> {
    pub fn new(runner: &'a R, overrides: &'a CiEnvironment) -> Self {
        Self {
            runner,
            overrides,
            dir: None,
        }
    }

    /// Run git in `dir` instead of the process working directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let mut spec = CommandSpec::new("git").args(args.iter().copied());
        if let Some(ref dir) = self.dir {
            spec = spec.current_dir(dir);
        }
        Ok(self.runner.output(&spec).await?)
    }

    /// Full hash of HEAD.
    pub async fn current_commit(&self) -> Result<CommitSha> {
        let out = self.run(&["rev-parse", "HEAD"]).await?;
        CommitSha::new(out.trim_end())
            .map_err(|e| Error::Git(format!("rev-parse HEAD: {e}")))
    }

    /// Branch being deployed; the CI runner's value wins over the checkout.
    pub async fn current_branch(&self) -> Result<String> {
        if let Some(ref branch) = self.overrides.branch {
            return Ok(branch.clone());
        }

        let out = self.run(&["branch"]).await?;
        parse_current_branch(&out)
            .ok_or_else(|| Error::Git("no current branch in `git branch` output".to_string()))
    }

    /// Latest commit message, safe to embed in a comma separated `--set` list.
    pub async fn commit_message(&self) -> Result<String> {
        let message = match self.overrides.message {
            Some(ref message) => message.clone(),
            None => self
                .run(&["log", "-1", "--pretty=%B"])
                .await?
                .trim_end()
                .to_string(),
        };
        Ok(sanitize_message(&message))
    }

    pub async fn commit_author(&self) -> Result<Author> {
        let name = self.run(&["log", "-1", "--pretty=format:%an"]).await?;
        let email = self.run(&["log", "-1", "--pretty=format:%ae"]).await?;
        Ok(Author {
            name: name.trim_end().to_string(),
            email: email.trim_end().to_string(),
        })
    }

    /// `user.name` from the local git configuration.
    pub async fn user_name(&self) -> Result<String> {
        let out = self.run(&["config", "--get", "user.name"]).await?;
        Ok(out.trim_end().to_string())
    }

    /// Who is deploying: whoever unblocked the pipeline, else the local git user.
    pub async fn deployer(&self) -> Result<String> {
        match self.overrides.unblocker {
            Some(ref unblocker) => Ok(unblocker.clone()),
            None => self.user_name().await,
        }
    }

    pub async fn remote_url(&self) -> Result<String> {
        let out = self.run(&["remote", "get-url", REMOTE]).await?;
        Ok(out.trim().to_string())
    }

    /// `owner/name` of the `origin` remote on `host`.
    pub async fn repo_slug(&self, host: &str) -> Result<RepoSlug> {
        let url = self.remote_url().await?;
        Ok(RepoSlug::from_remote_url(&url, host))
    }
}

/// Pick the branch marked `* ` in `git branch` output.
pub fn parse_current_branch(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("* "))
        .map(|branch| branch.trim_end().to_string())
}

/// Replace `;` and `,` with `.`.
pub fn sanitize_message(message: &str) -> String {
    message.replace([';', ','], ".")
}
