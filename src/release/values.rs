// ABOUTME: Ordered deployment metadata passed to helm as --set values.
// ABOUTME: Keeps insertion order so the rendered command is stable.

use crate::git::Author;
use crate::types::CommitSha;

/// Ordered `key=value` pairs for one helm invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseValues(Vec<(String, String)>);

impl ReleaseValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> Vec<&str> {
        self.0.iter().map(|(k, _)| k.as_str()).collect()
    }
}

/// Everything recorded about a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseMetadata {
    pub branch: String,
    pub commit: CommitSha,
    /// Person responsible for the deploy.
    pub owner: String,
    pub message: String,
    pub digest: String,
    pub author: Author,
}

impl ReleaseMetadata {
    pub fn values(&self) -> ReleaseValues {
        let mut values = ReleaseValues::new();
        values.push("branch", self.branch.as_str());
        values.push("commit", self.commit.as_str());
        values.push("owner", self.owner.as_str());
        values.push("message", self.message.as_str());
        values.push("image.digest", self.digest.as_str());
        values.push("author.name", self.author.name.as_str());
        values.push("author.email", self.author.email.as_str());
        values
    }
}
