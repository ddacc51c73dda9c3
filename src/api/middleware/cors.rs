//! Cross-origin resource sharing policy.

use tower_http::cors::CorsLayer;

/// Allows any origin, method and header.
///
/// The API is public and unauthenticated, so browsers may call it from any page.
pub fn layer() -> CorsLayer {
    CorsLayer::permissive()
}
