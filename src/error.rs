use thiserror::Error;

/// Failures of the report pipeline that callers may want to tell apart
#[derive(Debug, Error)]
pub enum ReportError {
    /// A sum was requested over an empty set of durations
    #[error("cannot sum an empty sequence of durations")]
    NoDurations,

    /// No non-archived channel carries the requested name
    #[error("no channel with name {0} found")]
    ChannelNotFound(String),

    /// A PR was added before its repository was registered
    #[error("repository {0} has not been registered")]
    UnknownRepository(String),

    /// Slack answered with `ok: false`
    #[error("Slack API {method} failed: {error}")]
    Slack { method: String, error: String },
}
