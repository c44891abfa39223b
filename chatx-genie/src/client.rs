//! Genie conversation API client.
//!
//! Thin wrapper over the Genie spaces REST API: start a conversation, poll the
//! message until it completes, then fetch query-result attachments. The
//! dispatcher depends on the [`GenieBackend`] trait so tests can substitute a
//! canned backend without HTTP.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use chatx_core::{ChatxError, Result};

use crate::result::{GenieResult, GenieResultMetadata, StatementResponse};

/// Masks an API token for safe logging: first 7 chars + "***" + last 4 chars.
/// Tokens of 11 chars or fewer render as "***" to avoid leaking any part.
/// Counts characters, not bytes, so multi-byte tokens never split mid-char.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        "***".to_string()
    } else {
        let head: String = chars[..7].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    }
}

/// Backend that turns a user prompt into a query result.
#[async_trait]
pub trait GenieBackend: Send + Sync {
    async fn ask(&self, prompt: &str) -> Result<GenieResult>;
}

/// HTTP client for one Genie space.
#[derive(Clone)]
pub struct GenieClient {
    http: reqwest::Client,
    host: String,
    token: String,
    space_id: String,
    poll_interval: Duration,
    max_polls: u32,
}

#[derive(Debug, Deserialize)]
struct StartConversationResponse {
    conversation_id: String,
    message_id: String,
}

#[derive(Debug, Deserialize)]
struct GenieMessage {
    status: String,
    #[serde(default)]
    attachments: Vec<GenieAttachment>,
}

#[derive(Debug, Deserialize)]
struct GenieAttachment {
    attachment_id: String,
    text: Option<TextAttachment>,
    query: Option<QueryAttachment>,
}

#[derive(Debug, Deserialize)]
struct TextAttachment {
    content: String,
}

#[derive(Debug, Deserialize)]
struct QueryAttachment {
    description: Option<String>,
    query_result_metadata: Option<GenieResultMetadata>,
}

#[derive(Debug, Deserialize)]
struct QueryResultResponse {
    statement_response: Option<StatementResponse>,
}

impl GenieClient {
    /// Builds a client for the given workspace host, API token, and space.
    pub fn new(host: impl Into<String>, token: impl Into<String>, space_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            host: host.into().trim_end_matches('/').to_string(),
            token: token.into(),
            space_id: space_id.into(),
            poll_interval: Duration::from_secs(1),
            max_polls: 60,
        }
    }

    /// Overrides the message polling cadence (interval between polls and the
    /// maximum number of polls before giving up).
    pub fn with_polling(mut self, interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = interval;
        self.max_polls = max_polls;
        self
    }

    fn space_url(&self, suffix: &str) -> String {
        format!(
            "{}/api/2.0/genie/spaces/{}{}",
            self.host, self.space_id, suffix
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| ChatxError::Backend(e.to_string()))?
            .error_for_status()
            .map_err(|e| ChatxError::Backend(e.to_string()))?;
        response
            .json::<T>()
            .await
            .map_err(|e| ChatxError::Backend(e.to_string()))
    }

    async fn start_conversation(&self, content: &str) -> Result<StartConversationResponse> {
        let url = self.space_url("/start-conversation");
        info!(
            space_id = %self.space_id,
            token = %mask_token(&self.token),
            "starting Genie conversation"
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await
            .map_err(|e| ChatxError::Backend(e.to_string()))?
            .error_for_status()
            .map_err(|e| ChatxError::Backend(e.to_string()))?;
        response
            .json()
            .await
            .map_err(|e| ChatxError::Backend(e.to_string()))
    }

    /// Polls the conversation message until COMPLETED, failing on FAILED or
    /// CANCELLED status or when the poll budget is exhausted.
    async fn wait_for_message(&self, conversation_id: &str, message_id: &str) -> Result<GenieMessage> {
        let url = self.space_url(&format!(
            "/conversations/{}/messages/{}",
            conversation_id, message_id
        ));
        for attempt in 0..self.max_polls {
            let message: GenieMessage = self.get_json(&url).await?;
            debug!(status = %message.status, attempt = attempt, "Genie message poll");
            match message.status.as_str() {
                "COMPLETED" => return Ok(message),
                "FAILED" | "CANCELLED" => {
                    return Err(ChatxError::Backend(format!(
                        "Genie message ended with status {}",
                        message.status
                    )))
                }
                _ => tokio::time::sleep(self.poll_interval).await,
            }
        }
        Err(ChatxError::Backend(format!(
            "Genie message not completed after {} polls",
            self.max_polls
        )))
    }

    async fn fetch_query_result(&self, message_id: &str, attachment_id: &str) -> Result<Option<StatementResponse>> {
        let url = self.space_url(&format!(
            "/messages/{}/attachments/{}/query-result",
            message_id, attachment_id
        ));
        let response: QueryResultResponse = self.get_json(&url).await?;
        Ok(response.statement_response)
    }
}

#[async_trait]
impl GenieBackend for GenieClient {
    /// Runs one conversation turn and assembles the resulting [`GenieResult`]
    /// from the completed message's attachments.
    async fn ask(&self, prompt: &str) -> Result<GenieResult> {
        let started = self.start_conversation(prompt).await?;
        let message = self
            .wait_for_message(&started.conversation_id, &started.message_id)
            .await?;

        let mut result = GenieResult::default();
        for attachment in message.attachments {
            if let Some(text) = attachment.text {
                result.message = Some(text.content);
            }
            if let Some(query) = attachment.query {
                result.query_description = query.description;
                result.query_result_metadata = query.query_result_metadata;
                result.statement_response = self
                    .fetch_query_result(&started.message_id, &attachment.attachment_id)
                    .await?;
            }
        }
        Ok(result)
    }
}
