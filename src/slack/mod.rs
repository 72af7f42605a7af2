pub mod client;
pub mod types;

pub use client::SlackClient;
pub use types::{Channel, FileUpload, ListChannels, PostMessage};

use anyhow::Result;

use crate::error::ReportError;

/// Write access to the chat workspace reports are published to
#[allow(async_fn_in_trait)]
pub trait Messenger {
    async fn list_channels(&self, request: &ListChannels) -> Result<Vec<Channel>>;

    async fn post_message(&self, message: &PostMessage) -> Result<()>;

    async fn upload(&self, upload: &FileUpload) -> Result<()>;
}

/// Id of the channel named exactly `name`
pub fn find_channel_id<'a>(channels: &'a [Channel], name: &str) -> Result<&'a str, ReportError> {
    channels
        .iter()
        .find(|channel| channel.name == name)
        .map(|channel| channel.id.as_str())
        .ok_or_else(|| ReportError::ChannelNotFound(name.to_string()))
}
