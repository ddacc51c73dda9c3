//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /api/shorturl/{code}`
///
/// # Response
///
/// `302 Found` with `Location` set to the original URL, exactly as submitted.
///
/// # Errors
///
/// Returns 404 `"No URL Found"` if the code is unknown.
/// Returns 500 if the store fails.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let original_url = state.mapping_service.resolve(&code).await?;

    debug!(code = %code, "Redirecting to {}", original_url);

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]).into_response())
}
