//! Process-wide cache handle with fail-open health tracking.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::time::{Instant, timeout};
use tracing::{info, warn};

use super::null_cache::NullCache;
use super::redis_cache::RedisCache;
use super::service::{CacheError, CacheResult, CacheService};

/// Marker stored in `disabled_at` while the cache is healthy.
const HEALTHY: u64 = u64::MAX;

/// Health of the cache as seen by this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheState {
    Healthy,
    Disabled,
}

/// Tuning for cache calls.
#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// Upper bound for every GET/SET/DEL/PING.
    pub op_timeout: Duration,
    /// Upper bound for the initial connection at startup.
    pub connect_timeout: Duration,
    /// Cooldown after which a disabled cache is tried again.
    /// `None` keeps the cache disabled for the rest of the process. Has no
    /// effect on a handle whose initial connect failed.
    pub retry_after: Option<Duration>,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            op_timeout: Duration::from_millis(2000),
            connect_timeout: Duration::from_millis(2000),
            retry_after: None,
        }
    }
}

/// Cache backend plus its health flag, built once and shared by all requests.
///
/// Every backend call goes through the handle. Any error or timeout flips the
/// handle from [`CacheState::Healthy`] to [`CacheState::Disabled`]; from then
/// on no backend call is made and every read is a miss. The transition is a
/// single compare-and-swap, so concurrent failures disable (and log) once.
///
/// With [`CacheOptions::retry_after`] set, the first call after the cooldown
/// re-enables the cache. Without it the disablement is permanent.
pub struct CacheHandle {
    backend: Arc<dyn CacheService>,
    configured: bool,
    can_recover: bool,
    /// Milliseconds since `epoch` at which the cache was disabled, or [`HEALTHY`].
    disabled_at: AtomicU64,
    epoch: Instant,
    options: CacheOptions,
}

impl CacheHandle {
    /// Wraps a connected backend. The handle starts healthy.
    pub fn new(backend: Arc<dyn CacheService>, options: CacheOptions) -> Self {
        Self {
            backend,
            configured: true,
            can_recover: true,
            disabled_at: AtomicU64::new(HEALTHY),
            epoch: Instant::now(),
            options,
        }
    }

    /// Handle for a process without a cache endpoint. Permanently disabled.
    pub fn disabled() -> Self {
        Self {
            backend: Arc::new(NullCache::new()),
            configured: false,
            can_recover: false,
            disabled_at: AtomicU64::new(0),
            epoch: Instant::now(),
            options: CacheOptions::default(),
        }
    }

    /// Endpoint configured but not reachable at startup.
    fn unreachable(options: CacheOptions) -> Self {
        Self {
            configured: true,
            options,
            ..Self::disabled()
        }
    }

    /// Connects to Redis when a URL is configured.
    ///
    /// Never fails: a missing URL, an invalid URL, a refused connection or a
    /// connect timeout all produce a disabled handle, and the service runs on
    /// the durable store alone.
    pub async fn connect(redis_url: Option<&str>, options: CacheOptions) -> Self {
        let Some(url) = redis_url else {
            info!("Cache disabled (no endpoint configured)");
            return Self::disabled();
        };

        match timeout(options.connect_timeout, RedisCache::connect(url)).await {
            Ok(Ok(redis)) => {
                info!("Cache enabled (Redis)");
                Self::new(Arc::new(redis), options)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Failed to connect to Redis, caching disabled");
                Self::unreachable(options)
            }
            Err(_) => {
                warn!(
                    timeout_ms = options.connect_timeout.as_millis() as u64,
                    "Timed out connecting to Redis, caching disabled"
                );
                Self::unreachable(options)
            }
        }
    }

    /// Whether a cache endpoint was configured at all.
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Current state, without triggering a cooldown re-enable.
    pub fn state(&self) -> CacheState {
        if self.disabled_at.load(Ordering::Acquire) == HEALTHY {
            CacheState::Healthy
        } else {
            CacheState::Disabled
        }
    }

    /// `GET key`. `None` on a miss, while disabled, or on error.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.run("GET", || self.backend.get(key)).await.flatten()
    }

    /// `SET key value EX ttl_seconds`. Returns whether the write happened.
    pub async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> bool {
        self.run("SET", || self.backend.set(key, value, ttl_seconds))
            .await
            .is_some()
    }

    /// `DEL key`. Returns whether the delete happened.
    pub async fn invalidate(&self, key: &str) -> bool {
        self.run("DEL", || self.backend.delete(key)).await.is_some()
    }

    /// `PING`. Returns whether the backend answered.
    pub async fn probe(&self) -> bool {
        self.run("PING", || self.backend.ping()).await.is_some()
    }

    async fn run<T, F, Fut>(&self, op: &'static str, call: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CacheResult<T>>,
    {
        if !self.is_available() {
            return None;
        }

        let outcome = match timeout(self.options.op_timeout, call()).await {
            Ok(result) => result,
            Err(_) => Err(CacheError::Timeout(
                self.options.op_timeout.as_millis() as u64
            )),
        };

        match outcome {
            Ok(value) => Some(value),
            Err(e) => {
                self.disable(op, &e);
                None
            }
        }
    }

    fn is_available(&self) -> bool {
        let disabled_at = self.disabled_at.load(Ordering::Acquire);
        if disabled_at == HEALTHY {
            return true;
        }
        if !self.can_recover {
            return false;
        }
        let Some(retry_after) = self.options.retry_after else {
            return false;
        };

        let elapsed = self.now_millis().saturating_sub(disabled_at);
        if elapsed < retry_after.as_millis() as u64 {
            return false;
        }

        if self
            .disabled_at
            .compare_exchange(disabled_at, HEALTHY, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            info!(disabled_for_ms = elapsed, "Cooldown elapsed, re-enabling cache");
        }
        true
    }

    fn disable(&self, op: &'static str, error: &CacheError) {
        metrics::counter!("blog_posts_cache_errors_total", "operation" => op).increment(1);

        let now = self.now_millis();
        if self
            .disabled_at
            .compare_exchange(HEALTHY, now, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            warn!(operation = op, error = %error, "Cache error, disabling cache");
        }
    }

    fn now_millis(&self) -> u64 {
        (self.epoch.elapsed().as_millis() as u64).min(HEALTHY - 1)
    }
}
