use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use slack_prs::github::{create_client, GithubDirectory};
use slack_prs::slack::SlackClient;
use slack_prs::{App, ReportError, ReportSettings};

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Parser, Debug)]
#[command(name = "slack-prs")]
#[command(about = "Post open pull requests per owning team to a Slack channel", long_about = None)]
#[command(version)]
struct Cli {
    /// GitHub organization to report on
    #[arg(long)]
    org: String,

    /// Slack channel name to publish to
    #[arg(long)]
    channel: String,

    /// Only report teams whose name starts with this prefix (repeatable)
    #[arg(long = "team-prefix")]
    team_prefix: Vec<String>,

    /// Leave out the team with exactly this name (repeatable)
    #[arg(long = "exclude-team")]
    exclude_team: Vec<String>,

    /// Path to config file (defaults to ~/.config/slack-prs/config.yaml)
    #[arg(short, long)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(level))
        .with_writer(std::io::stderr)
        .init();
}

/// `RUST_LOG` when set, `level` otherwise
fn log_filter(level: Level) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match slack_prs::config::load_config(cli.config.map(PathBuf::from)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let credentials = match slack_prs::credentials::load_credentials() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Credential error: {}", e);
            std::process::exit(EXIT_AUTH);
        }
    };

    let github = match create_client(&credentials.github_token) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create GitHub client: {:#}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    let settings = ReportSettings {
        org: cli.org.clone(),
        channel: cli.channel,
        filter: slack_prs::config::team_filter(&config, &cli.team_prefix, &cli.exclude_team),
    };
    tracing::debug!("Team filter: {:?}", settings.filter);

    let app = App::new(
        GithubDirectory::new(github, cli.org),
        SlackClient::new(&credentials.slack_token),
        settings,
    );

    if let Err(e) = app.run().await {
        eprintln!("Error: {:#}", e);
        let code = match e.downcast_ref::<ReportError>() {
            Some(ReportError::ChannelNotFound(_)) => EXIT_CONFIG,
            _ => EXIT_NETWORK,
        };
        std::process::exit(code);
    }

    std::process::exit(EXIT_SUCCESS);
}
