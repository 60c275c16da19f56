// ABOUTME: Validated domain types for commits and repositories.
// ABOUTME: Newtypes keep commit hashes and owner/name slugs from being confused.

mod commit;
mod repo_slug;

pub use commit::{CommitSha, CommitShaError};
pub use repo_slug::{DEFAULT_HOST, RepoSlug, RepoSlugError};
