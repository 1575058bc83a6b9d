use std::sync::Arc;

use crate::config::RelayConfig;
use crate::upstream::{CompletionService, MessagesClient, UpstreamError};

/// Shared by every request: read-only configuration and the upstream client.
pub struct AppState {
    pub config: RelayConfig,
    pub upstream: Arc<dyn CompletionService>,
}

impl AppState {
    /// State backed by the real Messages API client.
    pub fn new(config: RelayConfig) -> Result<Arc<Self>, UpstreamError> {
        let upstream = Arc::new(MessagesClient::new(&config)?);
        Ok(Self::with_upstream(config, upstream))
    }

    pub fn with_upstream(config: RelayConfig, upstream: Arc<dyn CompletionService>) -> Arc<Self> {
        Arc::new(Self { config, upstream })
    }
}
