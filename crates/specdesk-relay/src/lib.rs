//! Request relay: one HTTP endpoint that wraps spec-sheet text in the prompt
//! template, calls the model service, and returns its reply untouched.

pub mod config;
mod error;
pub mod routes;
pub mod state;
pub mod upstream;

pub use config::RelayConfig;
pub use error::RelayError;
pub use state::AppState;
pub use upstream::{CompletionService, MessagesClient, UpstreamError};

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full router. Used by `serve` and by tests.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::router())
        .with_state(state)
}

/// Serve the relay on an already-bound listener until the process stops.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    info!(
        addr = %listener.local_addr()?,
        model = %state.config.model,
        credential = !state.config.api_key.is_empty(),
        "relay listening"
    );
    axum::serve(listener, build_router(state)).await
}
