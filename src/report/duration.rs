use chrono::Duration;

use crate::error::ReportError;

const DAYS_PER_YEAR: i64 = 365;
const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Sum a non-empty sequence of durations
///
/// Every caller aggregates a repo or team only once it owns at least one PR, so an
/// empty sequence is reported as [`ReportError::NoDurations`] rather than zero.
pub fn sum_durations<I>(durations: I) -> Result<Duration, ReportError>
where
    I: IntoIterator<Item = Duration>,
{
    let mut durations = durations.into_iter();
    let first = durations.next().ok_or(ReportError::NoDurations)?;
    Ok(durations.fold(first, |total, d| total + d))
}

/// Format a duration as "Y year(s) D day(s)", omitting zero components
///
/// Years are fixed 365-day periods. Returns "0" when both components are zero;
/// negative durations count as zero.
pub fn format_timedelta(duration: Duration) -> String {
    let days = duration.num_seconds().div_euclid(SECONDS_PER_DAY).max(0);
    let years = days / DAYS_PER_YEAR;
    let days = days % DAYS_PER_YEAR;

    let mut parts = Vec::new();
    if years > 0 {
        parts.push(format!("{} year{}", years, plural(years)));
    }
    if days > 0 {
        parts.push(format!("{} day{}", days, plural(days)));
    }

    if parts.is_empty() {
        "0".to_string()
    } else {
        parts.join(" ")
    }
}

fn plural(n: i64) -> &'static str {
    if n > 1 {
        "s"
    } else {
        ""
    }
}
