//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and caching.
//!
//! # Modules
//!
//! - [`cache`] - Cache backends and the fail-open [`cache::CacheHandle`]
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod persistence;
