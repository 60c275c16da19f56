// ABOUTME: Overrides supplied by the CI runner through environment variables.
// ABOUTME: Captured once per invocation so the rest of the crate never reads the environment.

/// Explicit digest to deploy, bypassing the CI lookup.
pub const DIGEST_VAR: &str = "DIGEST";
/// Branch being built, set by Buildkite.
pub const BRANCH_VAR: &str = "BUILDKITE_BRANCH";
/// Commit message of the build, set by Buildkite.
pub const MESSAGE_VAR: &str = "BUILDKITE_MESSAGE";
/// Person who unblocked a blocked pipeline step, set by Buildkite.
pub const UNBLOCKER_VAR: &str = "BUILDKITE_UNBLOCKER";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiEnvironment {
    pub digest: Option<String>,
    pub branch: Option<String>,
    pub message: Option<String>,
    pub unblocker: Option<String>,
}

impl CiEnvironment {
    pub fn from_env() -> Self {
        Self {
            digest: non_empty_var(DIGEST_VAR),
            branch: std::env::var(BRANCH_VAR).ok(),
            message: std::env::var(MESSAGE_VAR).ok(),
            // An empty unblocker means nobody unblocked the step.
            unblocker: non_empty_var(UNBLOCKER_VAR),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
