use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Only teams whose name starts with one of these are reported
    #[serde(default)]
    pub team_prefixes: Vec<String>,
    /// Teams left out of the report by exact name
    #[serde(default)]
    pub exclude_teams: Vec<String>,
}
