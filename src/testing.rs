//! In-memory stand-ins for GitHub and Slack used by unit tests

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::github::{Directory, PullRequest, PullRequestStream, RepoRef, SearchQuery, Team};
use crate::slack::{Channel, FileUpload, ListChannels, Messenger, PostMessage};

/// Install the TLS crypto provider the HTTP clients expect; safe to call repeatedly
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Build a PR in repository `org/<repo>`
pub fn pr(id: u64, repo: &str, created_at: DateTime<Utc>) -> PullRequest {
    PullRequest {
        id,
        repo: RepoRef::new("org", repo),
        created_at,
        url: format!("https://github.com/org/{}/pull/{}", repo, id),
        title: format!("PR #{}", id),
        author: "octocat".to_string(),
    }
}

#[derive(Default)]
pub struct FakeDirectory {
    teams: Vec<Team>,
    repo_teams: HashMap<String, Vec<Team>>,
    prs: Vec<PullRequest>,
    repo_team_calls: Mutex<Vec<String>>,
    queries: Mutex<Vec<SearchQuery>>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_team(mut self, team: Team) -> Self {
        self.teams.push(team);
        self
    }

    pub fn with_repo(mut self, name: &str, teams: Vec<Team>) -> Self {
        self.repo_teams.insert(name.to_string(), teams);
        self
    }

    pub fn with_pr(mut self, pr: PullRequest) -> Self {
        self.prs.push(pr);
        self
    }

    /// Repositories whose teams were requested, in call order
    pub fn repo_team_calls(&self) -> Vec<String> {
        self.repo_team_calls.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().unwrap().clone()
    }
}

impl Directory for FakeDirectory {
    async fn teams(&self) -> Result<Vec<Team>> {
        Ok(self.teams.clone())
    }

    async fn repo_teams(&self, repo: &RepoRef) -> Result<Vec<Team>> {
        self.repo_team_calls.lock().unwrap().push(repo.to_string());
        Ok(self.repo_teams.get(&repo.name).cloned().unwrap_or_default())
    }

    async fn open_pull_requests(&self, query: &SearchQuery) -> Result<PullRequestStream> {
        self.queries.lock().unwrap().push(query.clone());
        let items: Vec<Result<PullRequest>> = self.prs.iter().cloned().map(Ok).collect();
        Ok(PullRequestStream {
            total_count: Some(items.len() as u64),
            items: stream::iter(items).boxed(),
        })
    }
}

#[derive(Default)]
pub struct FakeMessenger {
    channels: Vec<Channel>,
    pub listed: Mutex<Vec<ListChannels>>,
    pub messages: Mutex<Vec<PostMessage>>,
    pub uploads: Mutex<Vec<FileUpload>>,
}

impl FakeMessenger {
    pub fn with_channels(channels: &[(&str, &str)]) -> Self {
        Self {
            channels: channels
                .iter()
                .map(|(name, id)| Channel {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<PostMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<FileUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

impl Messenger for FakeMessenger {
    async fn list_channels(&self, request: &ListChannels) -> Result<Vec<Channel>> {
        self.listed.lock().unwrap().push(request.clone());
        Ok(self.channels.clone())
    }

    async fn post_message(&self, message: &PostMessage) -> Result<()> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn upload(&self, upload: &FileUpload) -> Result<()> {
        self.uploads.lock().unwrap().push(upload.clone());
        Ok(())
    }
}
