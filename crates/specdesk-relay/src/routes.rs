use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::Method;
use axum::routing::any;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::RelayError;
use crate::state::AppState;

pub const GENERATE_PATH: &str = "/api/generate";

#[derive(Deserialize)]
struct GenerateRequest {
    #[serde(rename = "specInput")]
    spec_input: Option<String>,
}

pub fn router() -> Router<Arc<AppState>> {
    // `any` so that other methods get the JSON 405 rather than axum's empty one.
    Router::new().route(GENERATE_PATH, any(generate))
}

async fn generate(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> Result<Json<Value>, RelayError> {
    if method != Method::POST {
        warn!(%method, "rejected non-POST generate request");
        return Err(RelayError::MethodNotAllowed);
    }

    let Some(spec_input) = spec_input(&body) else {
        warn!(body_bytes = body.len(), "generate request without spec input");
        return Err(RelayError::MissingInput);
    };

    info!(
        input_bytes = spec_input.len(),
        prompt = state.config.prompt.version(),
        "relaying spec input"
    );
    let prompt = state.config.prompt.render(&spec_input);
    match state.upstream.complete(prompt).await {
        Ok(reply) => Ok(Json(reply)),
        Err(e) => {
            error!(error = %e, "model service call failed");
            Err(e.into())
        }
    }
}

/// The non-empty `specInput` string, if the body has one.
fn spec_input(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<GenerateRequest>(body)
        .ok()?
        .spec_input
        .filter(|s| !s.is_empty())
}
