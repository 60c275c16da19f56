// ABOUTME: Digest command implementation.
// ABOUTME: Prints the artifact digest of a commit's CI build, or nothing while it builds.

use gosu_tasks::ci_env::CiEnvironment;
use gosu_tasks::config::Config;
use gosu_tasks::error::Result;
use gosu_tasks::github::GithubClient;
use gosu_tasks::jenkins::JenkinsClient;
use gosu_tasks::output::Output;
use gosu_tasks::process::CommandRunner;
use gosu_tasks::tasks::print_digest;
use gosu_tasks::types::CommitSha;

pub async fn digest<R: CommandRunner + ?Sized>(
    config: &Config,
    runner: &R,
    overrides: &CiEnvironment,
    commit: Option<CommitSha>,
    output: &Output,
) -> Result<()> {
    let github = GithubClient::new(&config.github)?;
    let jenkins = JenkinsClient::new(&config.jenkins)?;

    print_digest(config, runner, overrides, &github, &jenkins, commit, output).await?;
    Ok(())
}
