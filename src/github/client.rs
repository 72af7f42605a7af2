use anyhow::{Context, Result};
use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;

use crate::github::search::{search_prs, SearchQuery};
use crate::github::types::{PullRequestStream, RepoRef, Team};
use crate::github::Directory;

/// Create an authenticated GitHub client using a personal access token
pub fn create_client(token: &str) -> Result<Octocrab> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .context("Failed to create GitHub client")
}

/// GitHub organization backed by the REST API
pub struct GithubDirectory {
    client: Octocrab,
    org: String,
}

impl GithubDirectory {
    pub fn new(client: Octocrab, org: impl Into<String>) -> Self {
        Self {
            client,
            org: org.into(),
        }
    }
}

impl Directory for GithubDirectory {
    async fn teams(&self) -> Result<Vec<Team>> {
        list_all(&self.client, format!("/orgs/{}/teams", self.org))
            .await
            .with_context(|| format!("Failed to list teams of {}", self.org))
    }

    async fn repo_teams(&self, repo: &RepoRef) -> Result<Vec<Team>> {
        list_all(
            &self.client,
            format!("/repos/{}/{}/teams", repo.owner, repo.name),
        )
        .await
        .with_context(|| format!("Failed to list teams of {}", repo))
    }

    async fn open_pull_requests(&self, query: &SearchQuery) -> Result<PullRequestStream> {
        search_prs(&self.client, query).await
    }
}

/// Fetch every page of a list endpoint
async fn list_all<T: DeserializeOwned>(client: &Octocrab, route: String) -> Result<Vec<T>> {
    let first: Page<T> = client.get(route, Some(&[("per_page", "100")])).await?;
    let items = client.all_pages(first).await?;
    Ok(items)
}
