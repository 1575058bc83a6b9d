//! Relay configuration: upstream endpoint, credential, model, and prompt.

use std::time::Duration;

use specdesk_core::PromptTemplate;

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 4000;
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Clone)]
pub struct RelayConfig {
    pub upstream_url: String,
    /// Sent as `x-api-key`. Empty when unset; the service rejects it then.
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    /// `None` leaves the HTTP client without a request timeout.
    pub timeout: Option<Duration>,
    pub prompt: PromptTemplate,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: None,
            prompt: PromptTemplate::builtin(),
        }
    }
}

// Keep the credential out of logs.
impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("upstream_url", &self.upstream_url)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .field("prompt", &self.prompt.version())
            .finish()
    }
}
