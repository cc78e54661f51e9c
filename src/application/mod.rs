//! Application layer services implementing business logic.
//!
//! Services consume repository traits and the cache handle and provide a
//! clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::post_service::PostService`] - Cached read/write access to posts

pub mod services;
