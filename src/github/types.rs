use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use serde::Deserialize;
use std::fmt;

/// Permission GitHub reports for teams that administer a repository
pub const ADMIN_PERMISSION: &str = "admin";

/// Repository a PR belongs to, as "owner/name"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse the owner and name from an API url
    /// Format: "https://api.github.com/repos/owner/repo"
    pub fn from_api_url(url: &str) -> Option<Self> {
        let mut parts = url.trim_end_matches('/').rsplit('/');
        let name = parts.next().filter(|s| !s.is_empty())?;
        let owner = parts.next().filter(|s| !s.is_empty())?;
        Some(Self::new(owner, name))
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone)]
pub struct PullRequest {
    pub id: u64,
    pub repo: RepoRef,
    pub created_at: DateTime<Utc>,
    pub url: String, // HTML URL for browser
    pub title: String,
    pub author: String,
}

impl PullRequest {
    /// Time the PR has been open as of `now`
    pub fn open_duration(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.created_at
    }
}

/// A team together with the permission it holds in the listing context
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub permission: String,
}

impl Team {
    pub fn new(name: impl Into<String>, permission: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permission: permission.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.permission == ADMIN_PERMISSION
    }
}

/// Lazily paged search results
pub struct PullRequestStream {
    /// Total matches reported by the search API, if any
    pub total_count: Option<u64>,
    pub items: BoxStream<'static, anyhow::Result<PullRequest>>,
}
