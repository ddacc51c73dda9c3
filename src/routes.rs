//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`                     - Landing page (`views/index.html`)
//! - `GET  /health`               - Health check
//! - `GET  /public/*`             - Static assets
//! - `/api/*`                     - Shortener API (see [`crate::api::routes`])
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive cross-origin policy
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Directory holding the landing page.
pub const VIEWS_DIR: &str = "views";

/// Directory served under `/public`.
pub const PUBLIC_DIR: &str = "public";

/// Builds the router with all routes and per-route middleware.
///
/// Trailing slashes are not normalized here; see [`app_router`].
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(format!("{VIEWS_DIR}/index.html")))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::routes())
        .nest_service("/public", ServeDir::new(PUBLIC_DIR))
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer())
}

/// Constructs the application router, trimming trailing slashes before routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
