//! HTTP client for the relay's generate endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::ClientError;

pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:3000/api/generate";

/// The relay as seen from the client: spec text in, opaque JSON body out.
///
/// The body is returned whatever the HTTP status; error bodies carry an
/// `error` field that normalisation reports.
#[async_trait]
pub trait Relay: Send + Sync {
    async fn generate(&self, spec_input: &str) -> Result<Value, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub relay_url: String,
    /// `None` waits for the relay indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.to_string(),
            timeout: None,
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    #[serde(rename = "specInput")]
    spec_input: &'a str,
}

/// HTTP client for a running relay.
pub struct RelayClient {
    client: reqwest::Client,
    url: String,
}

impl RelayClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: config.relay_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Relay for RelayClient {
    async fn generate(&self, spec_input: &str) -> Result<Value, ClientError> {
        info!(url = %self.url, input_bytes = spec_input.len(), "sending spec input to relay");
        let resp = self
            .client
            .post(&self.url)
            .json(&GenerateRequest { spec_input })
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        let body = serde_json::from_str(&text).map_err(|source| ClientError::NotJson {
            status: status.as_u16(),
            source,
        })?;
        info!(status = status.as_u16(), "relay replied");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::ServerGuard) -> RelayClient {
        RelayClient::new(&ClientConfig {
            relay_url: format!("{}/api/generate", server.url()),
            timeout: None,
        })
        .unwrap()
    }

    #[test]
    fn default_config_points_at_local_relay() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.relay_url, "http://127.0.0.1:3000/api/generate");
        assert!(cfg.timeout.is_none());
    }

    #[tokio::test]
    async fn posts_spec_input_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::Json(json!({"specInput": "TUB FILLER"})))
            .with_status(200)
            .with_body(r#"{"content":[{"text":"[]"}]}"#)
            .expect(1)
            .create_async()
            .await;

        let body = client_for(&server).generate("TUB FILLER").await.unwrap();
        assert_eq!(body["content"][0]["text"], "[]");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_body_is_returned() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .with_status(400)
            .with_body(r#"{"error":"No spec input provided"}"#)
            .create_async()
            .await;

        let body = client_for(&server).generate("x").await.unwrap();
        assert_eq!(body, json!({"error": "No spec input provided"}));
    }

    #[tokio::test]
    async fn non_json_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .with_status(504)
            .with_body("Gateway Timeout")
            .create_async()
            .await;

        let err = client_for(&server).generate("x").await.unwrap_err();
        assert!(matches!(err, ClientError::NotJson { status: 504, .. }));
    }
}
