// ABOUTME: Repository owner/name identifier.
// ABOUTME: Derived from git remote URLs in SSH or HTTPS form, or parsed from user input.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Source-hosting domain assumed when none is configured.
pub const DEFAULT_HOST: &str = "github.com";

const VCS_SUFFIX: &str = ".git";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoSlugError {
    #[error("repository cannot be empty")]
    Empty,

    #[error("repository must have the form owner/name: {0}")]
    InvalidFormat(String),
}

/// An `owner/name` repository identifier as used by the hosting API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug(String);

impl RepoSlug {
    /// Parse an explicit `owner/name` value.
    pub fn parse(value: &str) -> Result<Self, RepoSlugError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(RepoSlugError::Empty);
        }

        match value.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self(value.to_string()))
            }
            _ => Err(RepoSlugError::InvalidFormat(value.to_string())),
        }
    }

    /// Derive the slug from a remote URL.
    ///
    /// Strips `git@<host>:` or `https://<host>/` when present and a trailing
    /// `.git`. URLs in any other form are kept whole apart from the suffix.
    pub fn from_remote_url(url: &str, host: &str) -> Self {
        let url = url.trim();
        let ssh_prefix = format!("git@{host}:");
        let https_prefix = format!("https://{host}/");

        let rest = url
            .strip_prefix(&ssh_prefix)
            .or_else(|| url.strip_prefix(&https_prefix))
            .unwrap_or(url);
        let rest = rest.strip_suffix(VCS_SUFFIX).unwrap_or(rest);

        Self(rest.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn owner(&self) -> Option<&str> {
        self.0.split_once('/').map(|(owner, _)| owner)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.split_once('/').map(|(_, name)| name)
    }
}

impl FromStr for RepoSlug {
    type Err = RepoSlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
