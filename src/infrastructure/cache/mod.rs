//! Caching layer for the posts collection snapshot.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`NullCache`] - No-op implementation for disabled caching
//!
//! and [`CacheHandle`], which owns the backend together with the one-way
//! healthy/disabled flag every request consults.

mod handle;
mod null_cache;
mod redis_cache;
mod service;

pub use handle::{CacheHandle, CacheOptions, CacheState};
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
