use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use futures::stream::{BoxStream, StreamExt};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

use crate::error::ReportError;
use crate::github::{Directory, PullRequest, RepoRef, Team};
use crate::report::duration::sum_durations;
use crate::report::filter::TeamFilter;

/// Log progress every this many PRs
const PROGRESS_INTERVAL: usize = 10;

/// A league table row before formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueRow<'a> {
    pub team: &'a str,
    pub count: usize,
    pub duration: Duration,
}

/// Per-team and per-repo view over every open PR of one run
///
/// PRs are stored once; team and repo lists hold indices into that storage, in the
/// order the PRs were added. A PR whose repository has several owner teams is
/// credited to each of them.
pub struct Aggregator {
    now: DateTime<Utc>,
    filter: TeamFilter,
    teams: BTreeMap<String, Team>,
    prs: Vec<PullRequest>,
    repo_owners: HashMap<String, Vec<String>>,
    team_repos: HashMap<String, Vec<String>>,
    team_prs: BTreeMap<String, Vec<usize>>,
    repo_prs: HashMap<String, Vec<usize>>,
    pr_durations: HashMap<u64, Duration>,
    team_durations: HashMap<String, Duration>,
    team_counts: HashMap<String, usize>,
    repo_durations: HashMap<String, Duration>,
}

impl Aggregator {
    /// `now` is the single snapshot every open duration is measured against
    pub fn new(now: DateTime<Utc>, filter: TeamFilter) -> Self {
        Self {
            now,
            filter,
            teams: BTreeMap::new(),
            prs: Vec::new(),
            repo_owners: HashMap::new(),
            team_repos: HashMap::new(),
            team_prs: BTreeMap::new(),
            repo_prs: HashMap::new(),
            pr_durations: HashMap::new(),
            team_durations: HashMap::new(),
            team_counts: HashMap::new(),
            repo_durations: HashMap::new(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Load the organization's teams, keeping those the filter accepts
    pub async fn fetch_teams<D: Directory>(&mut self, directory: &D) -> Result<()> {
        info!("Fetching teams...");
        self.teams = directory
            .teams()
            .await?
            .into_iter()
            .filter(|team| self.filter.includes(&team.name))
            .map(|team| (team.name.clone(), team))
            .collect();
        info!("Found {} teams.", self.teams.len());
        Ok(())
    }

    /// Register a repository and its admin teams; no-op if already known
    pub async fn add_repo<D: Directory>(&mut self, directory: &D, repo: &RepoRef) -> Result<()> {
        if self.repo_owners.contains_key(&repo.name) {
            return Ok(());
        }

        // Normally a single owner, but repos moving between teams report to all of them
        let owners: Vec<String> = directory
            .repo_teams(repo)
            .await?
            .into_iter()
            .filter(Team::is_admin)
            .map(|team| team.name)
            .collect();
        debug!("Repository {} owned by {:?}", repo, owners);

        for owner in &owners {
            self.team_repos
                .entry(owner.clone())
                .or_default()
                .push(repo.name.clone());
        }
        self.repo_owners.insert(repo.name.clone(), owners);
        Ok(())
    }

    /// Credit a PR to its repository and every owner team
    pub fn add_pr(&mut self, pr: PullRequest) -> Result<(), ReportError> {
        let owners = self
            .repo_owners
            .get(&pr.repo.name)
            .ok_or_else(|| ReportError::UnknownRepository(pr.repo.to_string()))?;

        let index = self.prs.len();
        for owner in owners {
            self.team_prs.entry(owner.clone()).or_default().push(index);
        }
        self.repo_prs
            .entry(pr.repo.name.clone())
            .or_default()
            .push(index);
        self.pr_durations.insert(pr.id, pr.open_duration(self.now));
        self.prs.push(pr);
        Ok(())
    }

    /// Consume a PR stream in a single pass, returning how many PRs were added
    pub async fn ingest<D: Directory>(
        &mut self,
        directory: &D,
        mut prs: BoxStream<'_, Result<PullRequest>>,
    ) -> Result<usize> {
        let mut processed = 0;
        while let Some(pr) = prs.next().await {
            let pr = pr?;
            self.add_repo(directory, &pr.repo).await?;
            self.add_pr(pr)?;
            if processed != 0 && processed % PROGRESS_INTERVAL == 0 {
                info!("Processed {} PRs.", processed);
            }
            processed += 1;
        }
        Ok(processed)
    }

    /// Total duration and PR count for every team owning at least one PR
    pub fn populate_team_durations_and_counts(&mut self) -> Result<(), ReportError> {
        for (team, repos) in &self.team_repos {
            let repos_with_prs: Vec<&Vec<usize>> = repos
                .iter()
                .filter_map(|repo| self.repo_prs.get(repo))
                .collect();
            if repos_with_prs.is_empty() {
                continue;
            }

            let repo_totals = repos_with_prs
                .iter()
                .map(|indices| sum_durations(indices.iter().map(|&i| self.duration_at(i))))
                .collect::<Result<Vec<_>, _>>()?;
            let count = repos_with_prs.iter().map(|indices| indices.len()).sum();

            self.team_durations
                .insert(team.clone(), sum_durations(repo_totals)?);
            self.team_counts.insert(team.clone(), count);
        }
        Ok(())
    }

    /// Total duration for every repository with PRs
    pub fn populate_repo_durations(&mut self) -> Result<(), ReportError> {
        for (repo, indices) in &self.repo_prs {
            let total = sum_durations(indices.iter().map(|&i| self.duration_at(i)))?;
            self.repo_durations.insert(repo.clone(), total);
        }
        Ok(())
    }

    fn duration_at(&self, index: usize) -> Duration {
        self.pr_durations
            .get(&self.prs[index].id)
            .copied()
            .unwrap_or_else(Duration::zero)
    }

    /// Teams that passed the filter, by name
    pub fn teams(&self) -> &BTreeMap<String, Team> {
        &self.teams
    }

    pub fn owners(&self, repo: &str) -> Option<&[String]> {
        self.repo_owners.get(repo).map(Vec::as_slice)
    }

    pub fn team_repos(&self, team: &str) -> &[String] {
        self.team_repos.get(team).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn team_prs(&self, team: &str) -> Vec<&PullRequest> {
        self.resolve(self.team_prs.get(team))
    }

    pub fn repo_prs(&self, repo: &str) -> Vec<&PullRequest> {
        self.resolve(self.repo_prs.get(repo))
    }

    fn resolve(&self, indices: Option<&Vec<usize>>) -> Vec<&PullRequest> {
        indices
            .map(|indices| indices.iter().map(|&i| &self.prs[i]).collect())
            .unwrap_or_default()
    }

    pub fn pr_duration(&self, id: u64) -> Option<Duration> {
        self.pr_durations.get(&id).copied()
    }

    pub fn team_duration(&self, team: &str) -> Option<Duration> {
        self.team_durations.get(team).copied()
    }

    pub fn team_count(&self, team: &str) -> Option<usize> {
        self.team_counts.get(team).copied()
    }

    pub fn repo_duration(&self, repo: &str) -> Option<Duration> {
        self.repo_durations.get(repo).copied()
    }

    /// One row per eligible team, shortest total open duration first
    ///
    /// Teams without PRs count as zero. Ties keep team name order.
    pub fn league_rows(&self) -> Vec<LeagueRow<'_>> {
        let mut rows: Vec<LeagueRow> = self
            .teams
            .keys()
            .map(|team| LeagueRow {
                team,
                count: self.team_count(team).unwrap_or(0),
                duration: self.team_duration(team).unwrap_or_else(Duration::zero),
            })
            .collect();
        // Stable sort over name-ordered teams: ties stay in byte order of the name
        rows.sort_by_key(|row| row.duration);
        rows
    }

    /// Every team owning at least one PR, by name, with its PRs in encounter order
    ///
    /// Owner teams are not filtered, so this can include teams missing from the
    /// league table.
    pub fn team_breakdown(&self) -> Vec<(&str, Vec<&PullRequest>)> {
        self.team_prs
            .iter()
            .map(|(team, indices)| (team.as_str(), self.resolve(Some(indices))))
            .collect()
    }
}
