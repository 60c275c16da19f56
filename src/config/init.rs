// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates gosu.yml template files.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::{CONFIG_FILENAME, DEFAULT_DIGEST_ACTION, DEFAULT_STATUS_CONTEXT};

/// Write a template `gosu.yml` into `dir`, returning its path.
pub fn init_config(dir: &Path, release: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let release = release.unwrap_or("my-app");
    if release.is_empty() || release.chars().any(char::is_whitespace) {
        return Err(Error::InvalidConfig(format!(
            "invalid release name: {release:?}"
        )));
    }

    std::fs::write(&config_path, generate_template_yaml(release))?;

    Ok(config_path)
}

fn generate_template_yaml(release: &str) -> String {
    format!(
        r#"github:
  username: {{ env: GITHUB_USERNAME }}
  # Personal access token with full "repo" scope for private organization repos
  password: {{ env: GITHUB_TOKEN }}
  context: {DEFAULT_STATUS_CONTEXT}

jenkins:
  username: {{ env: JENKINS_USERNAME }}
  password: {{ env: JENKINS_TOKEN }}
  digest_action: {DEFAULT_DIGEST_ACTION}
  poll_interval: 5s
  # wait_timeout: 30m

helm:
  # namespace: staging
  release: {release}
  chart: ./chart
"#
    )
}
