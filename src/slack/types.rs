use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

/// Parameters for listing channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChannels {
    pub exclude_archived: bool,
}

/// A chat message posted to one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMessage {
    pub channel: String,
    pub text: String,
}

/// A text file shared into one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub channel: String,
    pub content: String,
    pub filetype: String,
    pub filename: String,
    pub title: String,
}

/// Body of a `conversations.list` page
#[derive(Debug, Deserialize)]
pub(crate) struct ChannelPage {
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub response_metadata: Option<ResponseMetadata>,
}

impl ChannelPage {
    /// Cursor for the next page, `None` on the last page
    pub fn next_cursor(&self) -> Option<&str> {
        self.response_metadata
            .as_ref()
            .map(|meta| meta.next_cursor.as_str())
            .filter(|cursor| !cursor.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

/// Body of `files.getUploadURLExternal`
#[derive(Debug, Deserialize)]
pub(crate) struct UploadTicket {
    pub upload_url: String,
    pub file_id: String,
}
