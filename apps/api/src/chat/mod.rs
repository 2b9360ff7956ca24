//! Chat client: relays a conversation to the external chat endpoint.
//!
//! The portfolio does not run a model itself. The endpoint takes
//! `{"messages": [{role, content}, ...]}` and answers `{"reply": "..."}`.

pub mod handlers;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("chat response had no reply")]
    MissingReply,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    reply: Option<String>,
}

#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ChatError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends the conversation and returns the reply, or `None` on any failure.
    /// Failures are logged, never retried.
    pub async fn send_message(&self, messages: &[ChatMessage]) -> Option<String> {
        match self.try_send(messages).await {
            Ok(reply) => Some(reply),
            Err(e) => {
                error!("Chat request failed: {e}");
                None
            }
        }
    }

    pub async fn try_send(&self, messages: &[ChatMessage]) -> Result<String, ChatError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { messages })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        debug!(messages = messages.len(), "chat reply received");
        parsed.reply.ok_or(ChatError::MissingReply)
    }
}
