pub mod client;
pub mod search;
pub mod types;

pub use client::{create_client, GithubDirectory};
pub use search::{search_prs, SearchQuery};
pub use types::{PullRequest, PullRequestStream, RepoRef, Team, ADMIN_PERMISSION};

use anyhow::Result;

/// Read access to the organization the report covers
#[allow(async_fn_in_trait)]
pub trait Directory {
    /// All teams of the organization
    async fn teams(&self) -> Result<Vec<Team>>;

    /// Teams with access to `repo`, each with its permission on that repo
    async fn repo_teams(&self, repo: &RepoRef) -> Result<Vec<Team>>;

    /// PRs matching `query`, in the order the API returns them
    async fn open_pull_requests(&self, query: &SearchQuery) -> Result<PullRequestStream>;
}
