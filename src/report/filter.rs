/// Decide whether a team takes part in the report
///
/// An empty prefix list matches every name; an empty exclude list excludes nothing.
/// Exclusion wins over a prefix match.
pub fn include_team(name: &str, prefixes: &[String], excludes: &[String]) -> bool {
    prefix_matches(name, prefixes) && !is_excluded(name, excludes)
}

fn prefix_matches(name: &str, prefixes: &[String]) -> bool {
    prefixes.is_empty() || prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()))
}

fn is_excluded(name: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|excluded| excluded == name)
}

/// Prefix allow-list and exact-name deny-list for team names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamFilter {
    pub prefixes: Vec<String>,
    pub excludes: Vec<String>,
}

impl TeamFilter {
    pub fn new(prefixes: Vec<String>, excludes: Vec<String>) -> Self {
        Self { prefixes, excludes }
    }

    pub fn includes(&self, name: &str) -> bool {
        include_team(name, &self.prefixes, &self.excludes)
    }
}
