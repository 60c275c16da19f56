// ABOUTME: Commit reference newtype.
// ABOUTME: Accepts full or abbreviated hashes as reported by git or typed by an operator.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommitShaError {
    #[error("commit reference cannot be empty")]
    Empty,

    #[error("commit reference cannot contain whitespace")]
    ContainsWhitespace,
}

/// A commit reference, usually the hash of HEAD.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitSha(String);

impl CommitSha {
    pub fn new(value: &str) -> Result<Self, CommitShaError> {
        if value.is_empty() {
            return Err(CommitShaError::Empty);
        }

        if value.chars().any(char::is_whitespace) {
            return Err(CommitShaError::ContainsWhitespace);
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CommitSha {
    type Err = CommitShaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
