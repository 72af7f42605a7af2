use std::fmt;

/// Environment variable holding the GitHub personal access token
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Environment variable holding the Slack bot token
pub const SLACK_TOKEN_VAR: &str = "SLACK_BOT_TOKEN";

/// Tokens for both services
#[derive(Clone)]
pub struct Credentials {
    pub github_token: String,
    pub slack_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("github_token", &"<redacted>")
            .field("slack_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum CredentialError {
    Missing(&'static str),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::Missing(var) => {
                write!(f, "{} is not set. Export it before running.", var)
            }
        }
    }
}

impl std::error::Error for CredentialError {}

/// Trim a raw variable value; empty counts as unset
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn read_var(var: &'static str) -> Result<String, CredentialError> {
    non_empty(std::env::var(var).ok()).ok_or(CredentialError::Missing(var))
}

/// Read both tokens from the environment
pub fn load_credentials() -> Result<Credentials, CredentialError> {
    Ok(Credentials {
        github_token: read_var(GITHUB_TOKEN_VAR)?,
        slack_token: read_var(SLACK_TOKEN_VAR)?,
    })
}
