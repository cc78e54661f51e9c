//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: database and cache (public)
//! - `/posts*`           - Posts CRUD API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Configurable allowed origin for the browser frontend
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path normalization.
///
/// Integration tests drive this router directly.
pub fn router(state: AppState, cors_allow_origin: &str) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(api::routes::post_routes())
        .with_state(state)
        .layer(cors::layer(cors_allow_origin))
        .layer(tracing::layer())
}

/// Constructs the application service served by [`crate::server::run`].
///
/// Trailing slashes are trimmed before routing, so `/posts/` reaches `/posts`.
pub fn app_router(state: AppState, cors_allow_origin: &str) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, cors_allow_origin))
}
