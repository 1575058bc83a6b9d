use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Failures of the generate endpoint, each with a fixed status and body.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("No spec input provided")]
    MissingInput,

    #[error("Failed to process request")]
    Upstream(#[from] UpstreamError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingInput => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::MethodNotAllowed => (
                status,
                [(header::ALLOW, "POST")],
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            Self::MissingInput => (status, Json(json!({ "error": self.to_string() }))).into_response(),
            Self::Upstream(source) => (
                status,
                Json(json!({ "error": self.to_string(), "details": source.to_string() })),
            )
                .into_response(),
        }
    }
}
