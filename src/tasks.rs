// ABOUTME: One-shot lookups behind the digest and open-ci commands.
// ABOUTME: Generic over the lookup traits so they run against fakes in tests.

use crate::browser::open_in_browser;
use crate::ci_env::CiEnvironment;
use crate::config::Config;
use crate::error::Result;
use crate::git::Git;
use crate::github::{StatusLookup, lookup_status};
use crate::jenkins::DigestLookup;
use crate::output::Output;
use crate::process::CommandRunner;
use crate::types::{CommitSha, RepoSlug};

/// Print the digest built for `commit` (HEAD when `None`).
///
/// Asks Jenkins once. A build that has not published yet prints nothing.
pub async fn print_digest<R, S, D>(
    config: &Config,
    runner: &R,
    overrides: &CiEnvironment,
    statuses: &S,
    digests: &D,
    commit: Option<CommitSha>,
    output: &Output,
) -> Result<Option<String>>
where
    R: CommandRunner + ?Sized,
    S: StatusLookup + ?Sized,
    D: DigestLookup + ?Sized,
{
    let git = Git::new(runner, overrides);
    let commit = match commit {
        Some(commit) => commit,
        None => git.current_commit().await?,
    };

    let status = lookup_status(&config.github, &git, statuses, &commit, None, output).await?;
    let build = digests.build_digest(&status).await?;

    match build.digest {
        Some(ref digest) => output.value(digest),
        None => tracing::warn!("No digest published yet: {}", build.url),
    }

    Ok(build.digest)
}

/// Open the CI build page of HEAD, returning the URL opened.
///
/// The status target URL is opened as is; Jenkins itself is not queried.
pub async fn open_ci<R, S>(
    config: &Config,
    runner: &R,
    overrides: &CiEnvironment,
    statuses: &S,
    repo: Option<&RepoSlug>,
    output: &Output,
) -> Result<String>
where
    R: CommandRunner + ?Sized,
    S: StatusLookup + ?Sized,
{
    let git = Git::new(runner, overrides);
    let commit = git.current_commit().await?;

    let status = lookup_status(&config.github, &git, statuses, &commit, repo, output).await?;
    let url = status.target_url()?;

    output.progress(&format!("Opening {url}"));
    open_in_browser(runner, url).await?;

    Ok(url.to_string())
}
