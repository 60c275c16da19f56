// ABOUTME: Open-ci command implementation.
// ABOUTME: Opens the CI build page linked from the current commit's status.

use gosu_tasks::ci_env::CiEnvironment;
use gosu_tasks::config::Config;
use gosu_tasks::error::Result;
use gosu_tasks::github::GithubClient;
use gosu_tasks::output::Output;
use gosu_tasks::process::CommandRunner;
use gosu_tasks::tasks;
use gosu_tasks::types::RepoSlug;

/// Open the build page. Skips the Jenkins round-trip: the status link is enough.
pub async fn open_ci<R: CommandRunner + ?Sized>(
    config: &Config,
    runner: &R,
    overrides: &CiEnvironment,
    repo: Option<RepoSlug>,
    output: &Output,
) -> Result<()> {
    let github = GithubClient::new(&config.github)?;

    tasks::open_ci(config, runner, overrides, &github, repo.as_ref(), output).await?;
    Ok(())
}
