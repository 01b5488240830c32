use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures surfaced by the segment registry.
///
/// Request-scoped value-level outcomes, never process-fatal. Both are
/// terminal: `ended` is monotonic, so retrying a rejected registration
/// cannot succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Registration attempted against a stream that has ended.
    #[error("stream has ended")]
    StreamEnded,

    /// Registration attempted against a rendition that has ended.
    #[error("rendition has ended")]
    RenditionEnded,
}

/// HTTP-facing error for the stream endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Registry(RegistryError::StreamEnded) => (
                StatusCode::CONFLICT,
                "STREAM_ENDED",
                "Stream has ended; no further segments are accepted".to_string(),
            ),
            ApiError::Registry(RegistryError::RenditionEnded) => (
                StatusCode::CONFLICT,
                "RENDITION_ENDED",
                "Rendition has ended; no further segments are accepted".to_string(),
            ),
            ApiError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", reason.clone())
            }
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, "NOT_FOUND", what.clone()),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(error_response)).into_response()
    }
}
