//! Outbound transport to a single model endpoint (spec.md §4.4).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Abstracts the wire protocol to a model backend so the orchestrator's
/// retry/timeout/extraction logic can be tested without the network.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, endpoint: &str, prompt: &str, timeout: Duration) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Talks to an OpenAI-chat-compatible completion endpoint over HTTP.
pub struct HttpModelClient {
    http: reqwest::Client,
}

impl HttpModelClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for HttpModelClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelClient for HttpModelClient {
    async fn complete(&self, endpoint: &str, prompt: &str, timeout: Duration) -> Result<String> {
        let body = ChatRequest {
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
        };

        let response: ChatResponse = self
            .http
            .post(endpoint)
            .timeout(timeout)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default())
    }
}
