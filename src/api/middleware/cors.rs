//! CORS middleware for browser clients.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates the CORS layer for the posts API.
///
/// `allow_origin` is either `*` (any origin) or a single exact origin such as
/// `https://blog.example.com`. An origin that is not a valid header value
/// falls back to any origin with a warning.
///
/// Preflight `OPTIONS` requests are answered by the layer itself.
pub fn layer(allow_origin: &str) -> CorsLayer {
    let origin = if allow_origin == "*" {
        AllowOrigin::any()
    } else {
        match HeaderValue::from_str(allow_origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!(origin = allow_origin, "Invalid CORS origin, allowing any");
                AllowOrigin::any()
            }
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
