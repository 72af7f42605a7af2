use chrono::{DateTime, Utc};

use crate::github::types::PullRequest;
use crate::output::table::{Align, TextTable};
use crate::report::aggregate::{Aggregator, LeagueRow};
use crate::report::duration::format_timedelta;

const LEAGUE_HEADER: [&str; 3] = ["Team", "PRs", "Total open duration"];

/// Render league rows as a fixed-width text table
/// Columns: team (left), PR count (centered), total open duration (centered)
pub fn format_league_table(rows: &[LeagueRow]) -> String {
    let mut table =
        TextTable::new(LEAGUE_HEADER).with_align(&[Align::Left, Align::Center, Align::Center]);
    for row in rows {
        table.add_row([
            row.team.to_string(),
            row.count.to_string(),
            format_timedelta(row.duration),
        ]);
    }
    table.draw()
}

/// League table for every eligible team, shortest total open duration first
pub fn league_table(aggregator: &Aggregator) -> String {
    format_league_table(&aggregator.league_rows())
}

/// Chat message carrying the league table as a code block
pub fn summary_message(league_table: &str) -> String {
    format!("Pull requests by team:```{}```", league_table)
}

/// One PR as a breakdown bullet
/// Format: "    * {url} - {title} ({author}, {open duration})"
fn format_pr_line(pr: &PullRequest, open_duration: &str) -> String {
    format!(
        "    * {} - {} ({}, {})\n",
        pr.url, pr.title, pr.author, open_duration
    )
}

/// A team name followed by one line per PR
pub fn team_report(team: &str, prs: &[&PullRequest], aggregator: &Aggregator) -> String {
    let mut report = format!("{}\n", team);
    for pr in prs {
        let duration = aggregator
            .pr_duration(pr.id)
            .unwrap_or_else(|| pr.open_duration(aggregator.now()));
        report.push_str(&format_pr_line(pr, &format_timedelta(duration)));
    }
    report
}

/// Per-team reports for every team owning a PR, sorted by team name, blank line between
pub fn breakdown(aggregator: &Aggregator) -> String {
    aggregator
        .team_breakdown()
        .into_iter()
        .map(|(team, prs)| team_report(team, &prs, aggregator))
        .collect::<Vec<_>>()
        .join("\n")
}

/// File name of the breakdown upload for the run started at `now`
pub fn breakdown_filename(now: DateTime<Utc>) -> String {
    format!("prs-breakdown-{}.txt", now.format("%Y-%m-%d"))
}
