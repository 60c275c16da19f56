// ABOUTME: Deploy command implementation.
// ABOUTME: Wires the GitHub and Jenkins clients into the release flow.

use gosu_tasks::ci_env::CiEnvironment;
use gosu_tasks::config::Config;
use gosu_tasks::error::Result;
use gosu_tasks::github::GithubClient;
use gosu_tasks::jenkins::JenkinsClient;
use gosu_tasks::output::Output;
use gosu_tasks::process::CommandRunner;
use gosu_tasks::release::{Deploy, DeployRequest};

/// Deploy the current commit.
pub async fn deploy<R: CommandRunner + ?Sized>(
    config: &Config,
    runner: &R,
    overrides: &CiEnvironment,
    request: DeployRequest,
    mut output: Output,
) -> Result<()> {
    output.start_timer();

    // Credentials are checked only if a CI lookup happens.
    let github = GithubClient::new(&config.github)?;
    let jenkins = JenkinsClient::new(&config.jenkins)?;

    let upgrade = Deploy::new(config, runner, overrides, &github, &jenkins, &output)
        .run(&request)
        .await?;

    output.success(&format!("Deployed {}", upgrade.release));
    Ok(())
}
