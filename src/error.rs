//! Application error types and their HTTP representation.
//!
//! Client errors ([`AppError::InvalidUrl`], [`AppError::NotFound`]) are returned
//! verbatim. Server-side failures are logged with full detail and collapsed into
//! an opaque `"Server error..."` body so that no internal information leaks.

use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

/// Body returned for rejected URLs.
pub const INVALID_URL_MESSAGE: &str = "invalid url";

/// Body returned when a short code does not resolve.
pub const NOT_FOUND_MESSAGE: &str = "No URL Found";

/// Body returned for every internal failure.
pub const SERVER_ERROR_MESSAGE: &str = "Server error...";

/// Failure reported by a mapping store.
///
/// Callers must not assume any partial success when this is returned.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors surfaced by the mapping service and HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The submitted string is not an absolute http(s) URL.
    #[error("invalid url")]
    InvalidUrl,

    /// No mapping exists for the requested short code.
    #[error("no mapping for short code '{code}'")]
    NotFound { code: String },

    /// Every generated code collided with an existing mapping.
    #[error("failed to generate a unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl AppError {
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    /// Returns true for errors caused by the client rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidUrl | Self::NotFound { .. })
    }
}

impl From<ValidationErrors> for AppError {
    fn from(_: ValidationErrors) -> Self {
        Self::InvalidUrl
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidUrl => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    error: INVALID_URL_MESSAGE,
                }),
            )
                .into_response(),
            AppError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, Json(NOT_FOUND_MESSAGE)).into_response()
            }
            AppError::GenerationExhausted { .. } | AppError::Persistence(_) => {
                tracing::error!(error = ?self, "Request failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(SERVER_ERROR_MESSAGE)).into_response()
            }
        }
    }
}
