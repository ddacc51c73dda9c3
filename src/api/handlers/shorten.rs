//! Handler for the link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenPayload, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) short code for a URL.
///
/// # Endpoint
///
/// `POST /api/shorturl`
///
/// # Request Body
///
/// JSON `{"url": "https://www.freecodecamp.org"}` or the urlencoded form
/// `url=https%3A%2F%2Fwww.freecodecamp.org`.
///
/// # Response
///
/// ```json
/// {
///   "original_url": "https://www.freecodecamp.org",
///   "short_url": "Ab3dE9xQz"
/// }
/// ```
///
/// Submitting the same URL again returns the same `short_url`.
///
/// # Errors
///
/// Returns 401 `{"error":"invalid url"}` if the URL is rejected.
/// Returns 500 if the store fails or no unique code could be generated.
pub async fn shorten_handler(
    State(state): State<AppState>,
    ShortenPayload(payload): ShortenPayload,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let mapping = state.mapping_service.create_or_get(&payload.url).await?;

    Ok(Json(mapping.into()))
}
