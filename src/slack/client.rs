use anyhow::{Context, Result};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ReportError;
use crate::slack::types::{Channel, ChannelPage, FileUpload, ListChannels, PostMessage, UploadTicket};
use crate::slack::Messenger;

const SLACK_API_URL: &str = "https://slack.com/api";
const CHANNEL_PAGE_SIZE: &str = "200";

/// Slack Web API client authenticated with a bot token
pub struct SlackClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl SlackClient {
    pub fn new(token: &str) -> Self {
        Self::with_base_url(token, SLACK_API_URL)
    }

    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// Call a method with its arguments in the query string
    async fn get<T: DeserializeOwned>(&self, method: &str, params: &[(&str, String)]) -> Result<T> {
        let url = Url::parse_with_params(&self.method_url(method), params)
            .with_context(|| format!("Invalid Slack URL for {}", method))?;
        let body: Value = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("Failed to call Slack {}", method))?
            .error_for_status()
            .with_context(|| format!("Slack {} returned an error status", method))?
            .json()
            .await
            .with_context(|| format!("Failed to parse Slack {} response", method))?;
        parse_response(method, body)
    }

    /// Call a method with a JSON body
    async fn post<B: Serialize, T: DeserializeOwned>(&self, method: &str, payload: &B) -> Result<T> {
        let body: Value = self
            .http
            .post(self.method_url(method))
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("Failed to call Slack {}", method))?
            .error_for_status()
            .with_context(|| format!("Slack {} returned an error status", method))?
            .json()
            .await
            .with_context(|| format!("Failed to parse Slack {} response", method))?;
        parse_response(method, body)
    }
}

/// Unwrap Slack's `{"ok": .., "error": ..}` envelope
fn parse_response<T: DeserializeOwned>(method: &str, body: Value) -> Result<T> {
    if body.get("ok").and_then(Value::as_bool) != Some(true) {
        let error = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown_error")
            .to_string();
        return Err(ReportError::Slack {
            method: method.to_string(),
            error,
        }
        .into());
    }
    serde_json::from_value(body).with_context(|| format!("Unexpected Slack {} response", method))
}

impl Messenger for SlackClient {
    async fn list_channels(&self, request: &ListChannels) -> Result<Vec<Channel>> {
        let mut channels = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut params = vec![
                ("exclude_archived", request.exclude_archived.to_string()),
                ("limit", CHANNEL_PAGE_SIZE.to_string()),
            ];
            if let Some(cursor) = cursor.take() {
                params.push(("cursor", cursor));
            }

            let page: ChannelPage = self.get("conversations.list", &params).await?;
            cursor = page.next_cursor().map(str::to_string);
            channels.extend(page.channels);

            if cursor.is_none() {
                break;
            }
        }

        debug!("Listed {} channels", channels.len());
        Ok(channels)
    }

    async fn post_message(&self, message: &PostMessage) -> Result<()> {
        let _: Value = self.post("chat.postMessage", message).await?;
        Ok(())
    }

    async fn upload(&self, upload: &FileUpload) -> Result<()> {
        let ticket: UploadTicket = self
            .get(
                "files.getUploadURLExternal",
                &[
                    ("filename", upload.filename.clone()),
                    ("length", upload.content.len().to_string()),
                    ("snippet_type", upload.filetype.clone()),
                ],
            )
            .await?;

        self.http
            .post(&ticket.upload_url)
            .body(upload.content.clone().into_bytes())
            .send()
            .await
            .context("Failed to upload file content to Slack")?
            .error_for_status()
            .context("Slack rejected the file content")?;

        let _: Value = self
            .post(
                "files.completeUploadExternal",
                &json!({
                    "files": [{"id": ticket.file_id, "title": upload.title}],
                    "channel_id": upload.channel,
                }),
            )
            .await?;
        debug!("Uploaded {} to {}", upload.filename, upload.channel);
        Ok(())
    }
}
