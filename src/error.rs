// ABOUTME: Application-wide error types for gosu.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::process::CommandError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{service} credentials are not configured")]
    MissingCredentials { service: &'static str },

    #[error("no `{context}` status found for {repo}@{commit}")]
    BuildNotFound {
        repo: String,
        commit: String,
        context: String,
    },

    #[error("`{context}` status has no target URL")]
    MissingTargetUrl { context: String },

    #[error("build in progress: {url}")]
    BuildInProgress { url: String },

    #[error("no digest published after {waited:?}: {url}")]
    WaitTimeout { url: String, waited: Duration },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("unexpected git output: {0}")]
    Git(String),

    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
