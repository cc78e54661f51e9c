//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
    #[error("Cache operation timed out after {0} ms")]
    Timeout(u64),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value cache backend.
///
/// Backends report every failure. Deciding what a failure means for the
/// process (fail-open, disabling the cache) is the job of
/// [`crate::infrastructure::cache::CacheHandle`].
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// `GET key`. `Ok(None)` on a miss.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// `SET key value EX ttl_seconds`.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// `DEL key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Liveness probe (`PING`).
    async fn ping(&self) -> CacheResult<()>;
}
