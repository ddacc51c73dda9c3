//! DTOs for the link shortening endpoint.

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::domain::entities::UrlMapping;
use crate::error::AppError;

/// Request to shorten a URL.
///
/// A missing `url` field deserializes as an empty string and fails validation.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[serde(default)]
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

/// Response for a created or existing mapping.
///
/// `short_url` carries the bare short code, as consumed by
/// `GET /api/shorturl/{code}`.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: String,
}

impl From<UrlMapping> for ShortenResponse {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            original_url: mapping.original_url,
            short_url: mapping.short_code,
        }
    }
}

/// Extracts a [`ShortenRequest`] from either a JSON or an urlencoded form body.
///
/// Unreadable bodies are reported as [`AppError::InvalidUrl`].
#[derive(Debug)]
pub struct ShortenPayload(pub ShortenRequest);

impl<S> FromRequest<S> for ShortenPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| {
                content_type.starts_with("application/x-www-form-urlencoded")
            });

        let request = if is_form {
            let Form(request) = Form::<ShortenRequest>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    debug!("Rejected form body: {}", rejection);
                    AppError::InvalidUrl
                })?;
            request
        } else {
            let Json(request) = Json::<ShortenRequest>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    debug!("Rejected JSON body: {}", rejection);
                    AppError::InvalidUrl
                })?;
            request
        };

        Ok(Self(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_request_validation() {
        let valid = ShortenRequest {
            url: "https://www.freecodecamp.org".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = ShortenRequest {
            url: "not a url".to_string(),
        };
        assert!(invalid.validate().is_err());

        let empty = ShortenRequest { url: String::new() };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_missing_url_defaults_to_empty() {
        let request: ShortenRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.url, "");
    }

    #[test]
    fn test_response_from_mapping() {
        let mapping = UrlMapping::new(
            1,
            "https://www.freecodecamp.org".to_string(),
            "Ab3dE9xQz".to_string(),
            Utc::now(),
        );

        let json = serde_json::to_value(ShortenResponse::from(mapping)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "original_url": "https://www.freecodecamp.org",
                "short_url": "Ab3dE9xQz"
            })
        );
    }
}
