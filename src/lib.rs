pub mod app;
pub mod config;
pub mod credentials;
pub mod error;
pub mod github;
pub mod output;
pub mod report;
pub mod slack;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{App, ReportSettings};
pub use error::ReportError;
