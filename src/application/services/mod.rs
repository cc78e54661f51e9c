//! Business logic services for the application layer.

pub mod post_service;

pub use post_service::{DEFAULT_CACHE_TTL_SECONDS, POSTS_CACHE_KEY, PostService};
