pub mod aggregate;
pub mod duration;
pub mod filter;

pub use aggregate::{Aggregator, LeagueRow};
pub use duration::{format_timedelta, sum_durations};
pub use filter::{include_team, TeamFilter};
