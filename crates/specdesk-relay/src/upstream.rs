//! HTTP client for the model service's Messages endpoint.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use specdesk_core::CompletionOutcome;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ANTHROPIC_VERSION, RelayConfig};

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned {status} with a non-JSON body: {source}")]
    NotJson {
        status: u16,
        source: serde_json::Error,
    },
}

/// One prompted call to a text-completion service.
///
/// Returns the service's JSON body as-is, whatever its shape or HTTP status.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: String) -> Result<Value, UpstreamError>;
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// Messages API client with the credential and model fixed at construction.
pub struct MessagesClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl MessagesClient {
    pub fn new(config: &RelayConfig) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: config.upstream_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionService for MessagesClient {
    async fn complete(&self, prompt: String) -> Result<Value, UpstreamError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [Message {
                role: "user",
                content: &prompt,
            }],
        };

        info!(url = %self.url, model = %self.model, prompt_bytes = prompt.len(), "calling model service");
        let resp = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        let body: Value = serde_json::from_str(&text).map_err(|source| UpstreamError::NotJson {
            status: status.as_u16(),
            source,
        })?;

        let outcome = CompletionOutcome::classify(&body);
        match &outcome {
            CompletionOutcome::Success(text) => info!(
                status = status.as_u16(),
                outcome = outcome.as_str(),
                completion_bytes = text.len(),
                "model replied"
            ),
            CompletionOutcome::Error(message) => warn!(
                status = status.as_u16(),
                outcome = outcome.as_str(),
                error = %message,
                "model service reported an error"
            ),
            CompletionOutcome::Malformed => warn!(
                status = status.as_u16(),
                outcome = outcome.as_str(),
                "model reply has no text content"
            ),
        }
        Ok(body)
    }
}
