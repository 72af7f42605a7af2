pub mod formatter;
pub mod table;

pub use formatter::{
    breakdown, breakdown_filename, format_league_table, league_table, summary_message, team_report,
};
pub use table::{Align, TextTable};
