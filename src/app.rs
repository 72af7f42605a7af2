use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::github::{Directory, SearchQuery};
use crate::output::{breakdown, breakdown_filename, league_table, summary_message};
use crate::report::{Aggregator, TeamFilter};
use crate::slack::{find_channel_id, FileUpload, ListChannels, Messenger, PostMessage};

const BREAKDOWN_FILETYPE: &str = "text";
const BREAKDOWN_TITLE: &str = "Pull requests by team breakdown";

/// What to report on and where to publish it
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub org: String,
    pub channel: String,
    pub filter: TeamFilter,
}

/// One reporting run: fetch, aggregate, format, post
pub struct App<D, M> {
    directory: D,
    messenger: M,
    settings: ReportSettings,
    now: DateTime<Utc>,
}

impl<D: Directory, M: Messenger> App<D, M> {
    /// Captures the time snapshot used for every duration of the run
    pub fn new(directory: D, messenger: M, settings: ReportSettings) -> Self {
        Self {
            directory,
            messenger,
            settings,
            now: Utc::now(),
        }
    }

    /// Replace the run's time snapshot
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Run the report end to end
    ///
    /// The channel is resolved first so that a wrong channel name aborts the run
    /// before any data is fetched or published.
    pub async fn run(&self) -> Result<()> {
        let channel_id = self.find_channel().await?;

        let mut aggregator = Aggregator::new(self.now, self.settings.filter.clone());
        aggregator.fetch_teams(&self.directory).await?;

        info!("Starting search...");
        let results = self
            .directory
            .open_pull_requests(&SearchQuery::open_prs(&self.settings.org))
            .await?;
        match results.total_count {
            Some(total) => info!("Processing {} PRs...", total),
            None => info!("Processing PRs..."),
        }
        aggregator.ingest(&self.directory, results.items).await?;

        aggregator.populate_team_durations_and_counts()?;
        aggregator.populate_repo_durations()?;
        info!("Data collected, sending reports to slack...");

        self.messenger
            .post_message(&PostMessage {
                channel: channel_id.clone(),
                text: summary_message(&league_table(&aggregator)),
            })
            .await?;

        self.messenger
            .upload(&FileUpload {
                channel: channel_id,
                content: breakdown(&aggregator),
                filetype: BREAKDOWN_FILETYPE.to_string(),
                filename: breakdown_filename(self.now),
                title: BREAKDOWN_TITLE.to_string(),
            })
            .await?;

        info!("Complete.");
        Ok(())
    }

    async fn find_channel(&self) -> Result<String> {
        info!("Finding channel...");
        let channels = self
            .messenger
            .list_channels(&ListChannels {
                exclude_archived: true,
            })
            .await?;
        let id = find_channel_id(&channels, &self.settings.channel)?.to_string();
        info!("Found channel.");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::github::{PullRequest, RepoRef, Team};
    use crate::testing::{FakeDirectory, FakeMessenger};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap()
    }

    fn settings() -> ReportSettings {
        ReportSettings {
            org: "test-org".to_string(),
            channel: "test-channel".to_string(),
            filter: TeamFilter::default(),
        }
    }

    fn issue(
        id: u64,
        repo: &str,
        age: Duration,
        url: &str,
        title: &str,
        author: &str,
    ) -> PullRequest {
        PullRequest {
            id,
            repo: RepoRef::new("test-org", repo),
            created_at: now() - age,
            url: url.to_string(),
            title: title.to_string(),
            author: author.to_string(),
        }
    }

    fn directory() -> FakeDirectory {
        let team1 = Team::new("team1", "admin");
        let team2 = Team::new("team2", "admin");
        FakeDirectory::new()
            .with_team(team1.clone())
            .with_team(team2.clone())
            .with_repo("repo1", vec![team1])
            .with_repo("repo2", vec![team2.clone()])
            .with_repo("repo3", vec![team2])
            .with_pr(issue(
                123,
                "repo1",
                Duration::days(365 + 20),
                "https://link1",
                "pr-1",
                "test-user-1",
            ))
            .with_pr(issue(
                321,
                "repo2",
                Duration::days(2 * 365),
                "https://link2",
                "pr-2",
                "test-user-2",
            ))
            .with_pr(issue(
                231,
                "repo3",
                Duration::days(4 * 365 + 20),
                "https://link2",
                "pr-3",
                "test-user-2",
            ))
    }

    fn messenger() -> FakeMessenger {
        FakeMessenger::with_channels(&[
            ("decoy1", "not this"),
            ("test-channel", "this"),
            ("decoy2", "nor this"),
        ])
    }

    #[tokio::test]
    async fn test_report() {
        let app = App::new(directory(), messenger(), settings()).with_now(now());

        app.run().await.unwrap();

        assert_eq!(
            app.directory().queries(),
            vec![SearchQuery::open_prs("test-org")]
        );
        assert_eq!(
            *app.messenger().listed.lock().unwrap(),
            vec![ListChannels {
                exclude_archived: true
            }]
        );
        assert_eq!(
            app.messenger().messages(),
            vec![PostMessage {
                channel: "this".to_string(),
                text: "Pull requests by team:```\
                       Team    PRs   Total open duration\n\
                       =================================\n\
                       team1    1      1 year 20 days   \n\
                       team2    2      6 years 20 days  \n\
                       ```"
                .to_string(),
            }]
        );
        assert_eq!(
            app.messenger().uploads(),
            vec![FileUpload {
                channel: "this".to_string(),
                content: "team1\n\
                          \x20   * https://link1 - pr-1 (test-user-1, 1 year 20 days)\n\
                          \n\
                          team2\n\
                          \x20   * https://link2 - pr-2 (test-user-2, 2 years)\n\
                          \x20   * https://link2 - pr-3 (test-user-2, 4 years 20 days)\n"
                    .to_string(),
                filetype: "text".to_string(),
                filename: "prs-breakdown-2018-01-01.txt".to_string(),
                title: "Pull requests by team breakdown".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_report_each_repo_queried_once() {
        let directory = directory().with_pr(issue(
            999,
            "repo1",
            Duration::days(1),
            "https://link3",
            "pr-4",
            "test-user-3",
        ));
        let app = App::new(directory, messenger(), settings()).with_now(now());

        app.run().await.unwrap();

        assert_eq!(
            app.directory().repo_team_calls(),
            vec!["test-org/repo1", "test-org/repo2", "test-org/repo3"]
        );
    }

    #[tokio::test]
    async fn test_filtered_team_left_out_of_league_table() {
        let settings = ReportSettings {
            filter: TeamFilter::new(vec![], vec!["team2".to_string()]),
            ..settings()
        };
        let app = App::new(directory(), messenger(), settings).with_now(now());

        app.run().await.unwrap();

        let messages = app.messenger().messages();
        assert!(messages[0].text.contains("team1"));
        assert!(!messages[0].text.contains("team2"));
        assert!(app.messenger().uploads()[0].content.contains("team2\n"));
    }

    #[tokio::test]
    async fn test_missing_channel_aborts_before_publishing() {
        let messenger = FakeMessenger::with_channels(&[("decoy1", "not this")]);
        let app = App::new(directory(), messenger, settings()).with_now(now());

        let err = app.run().await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::ChannelNotFound(name)) if name == "test-channel"
        ));
        assert!(app.directory().queries().is_empty());
        assert!(app.messenger().messages().is_empty());
        assert!(app.messenger().uploads().is_empty());
    }

    #[tokio::test]
    async fn test_no_open_prs_still_publishes() {
        let directory = FakeDirectory::new().with_team(Team::new("quiet", "pull"));
        let app = App::new(directory, messenger(), settings()).with_now(now());

        app.run().await.unwrap();

        assert_eq!(
            app.messenger().messages()[0].text,
            "Pull requests by team:```\
             Team    PRs   Total open duration\n\
             =================================\n\
             quiet    0             0         \n\
             ```"
        );
        assert_eq!(app.messenger().uploads()[0].content, "");
    }
}
