use crate::error::Result;

pub mod client;
pub mod context;

pub use client::{GitHubClient, PR_BODY, PR_TITLE, PullRequest, PullRequestParams};
pub use context::RepoSlug;

/// Seam to the code host. The workflow needs exactly one write: opening the
/// pull request for the pushed update branch.
pub trait Forge: Send + Sync {
    fn open_pull_request(
        &self,
        slug: &RepoSlug,
        params: &PullRequestParams,
    ) -> Result<PullRequest>;
}
