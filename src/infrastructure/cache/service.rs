//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
///
/// The cache is a best-effort accelerator: these errors are returned to the
/// caller, and every caller applies its own degradation policy explicitly
/// (resolver treats them as a miss, click tracker skips, reconciler logs and
/// moves on). They never propagate past a component boundary.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
    #[error("Cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key prefix for cached code → URL resolutions.
pub const REDIRECT_KEY_PREFIX: &str = "shorturl:";

/// Key prefix for pending click counters.
pub const COUNTER_KEY_PREFIX: &str = "click:";

/// Builds the cache key holding the resolved URL for a code.
pub fn redirect_key(code: &str) -> String {
    format!("{}{}", REDIRECT_KEY_PREFIX, code)
}

/// Builds the cache key holding the pending click delta for a code.
pub fn counter_key(code: &str) -> String {
    format!("{}{}", COUNTER_KEY_PREFIX, code)
}

/// Trait for the fast key-value store used as redirect cache and click buffer.
///
/// Implementations must be thread-safe. All operations may fail transiently;
/// callers treat a failure as "unavailable, fall back to the durable store or
/// skip" — a single failed attempt is never retried in-core.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed production cache
/// - [`crate::infrastructure::cache::MemoryCache`] - in-process cache for tests
///   and single-node deployments
/// - [`crate::infrastructure::cache::NullCache`] - no-op when caching is disabled
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the value stored at `key`.
    ///
    /// Numeric values are returned in their textual form; callers that expect
    /// a counter decode it with `utils::coerce::coerce_count`.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` at `key` with a TTL in seconds.
    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Atomically adds `delta` to the integer at `key`, creating it at zero
    /// first if absent. Returns the new value.
    ///
    /// This per-key atomic increment is the only synchronization primitive the
    /// click pipeline relies on.
    async fn incr(&self, key: &str, delta: i64) -> CacheResult<i64>;

    /// Deletes `key`. Deleting a missing key is not an error.
    async fn del(&self, key: &str) -> CacheResult<()>;

    /// Enumerates keys matching a glob-style pattern (e.g. `click:*`).
    async fn scan_keys(&self, pattern: &str) -> CacheResult<Vec<String>>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by health check endpoints to report cache status.
    async fn health_check(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(redirect_key("AbC123"), "shorturl:AbC123");
        assert_eq!(counter_key("AbC123"), "click:AbC123");
    }
}
