//! Cache-aside redirect resolution.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{redirect_key, CacheService};

/// Resolves short codes to target URLs through a cache-aside lookup.
///
/// The cache is a best-effort accelerator: any cache failure is degraded to a
/// miss and the durable store remains the fallback of record. A warm hit is
/// served without re-checking expiry against the durable row; the TTL set at
/// population time (bounded by seconds-until-expiry) is the sole expiry
/// enforcement for cached entries, trading a staleness window of at most the
/// TTL for skipping a durable read per hit.
pub struct RedirectResolver {
    urls: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    default_ttl_seconds: u64,
}

impl RedirectResolver {
    pub fn new(
        urls: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        default_ttl_seconds: u64,
    ) -> Self {
        Self {
            urls,
            cache,
            default_ttl_seconds,
        }
    }

    /// Resolves a code to its target URL.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code is absent or expired (the redirect
    ///   fails closed when validity cannot be proven)
    /// - [`AppError::Storage`] if the durable store is unreachable on a cache
    ///   miss, kept distinct so operators can tell "absent" from "store down"
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let key = redirect_key(code);

        match self.cache.get(&key).await {
            Ok(Some(cached)) => {
                debug!("Cache HIT for {}", key);
                return Ok(cached);
            }
            Ok(None) => debug!("Cache MISS for {}", key),
            Err(e) => warn!("Cache unavailable for {}, falling back to store: {}", key, e),
        }

        let url = self
            .urls
            .find_by_code(code)
            .await?
            .filter(|u| !u.is_expired())
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "code": code }))
            })?;

        let ttl = url
            .seconds_until_expiry()
            .map(|s| s as u64)
            .unwrap_or(self.default_ttl_seconds);

        if let Err(e) = self.cache.set_ex(&key, &url.long_url, ttl).await {
            warn!("Failed to cache {}: {}", key, e);
        }

        Ok(url.long_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortUrl;
    use crate::domain::repositories::MockUrlRepository;
    use crate::infrastructure::cache::MemoryCache;
    use chrono::{Duration, Utc};

    fn stored(code: &str, url: &str, expires_at: Option<chrono::DateTime<Utc>>) -> ShortUrl {
        ShortUrl::new(1, code.to_string(), url.to_string(), Utc::now(), expires_at, 0)
    }

    #[tokio::test]
    async fn test_cold_cache_resolves_and_populates() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(stored(code, "https://example.com", None))));

        let cache = Arc::new(MemoryCache::new());
        let resolver = RedirectResolver::new(Arc::new(urls), cache.clone(), 3600);

        let url = resolver.resolve("AbC123").await.unwrap();
        assert_eq!(url, "https://example.com");

        // Population is observable via a direct cache read, with a TTL no
        // larger than the configured default window.
        assert_eq!(
            cache.get("shorturl:AbC123").await.unwrap(),
            Some("https://example.com".to_string())
        );
        assert!(cache.ttl_seconds("shorturl:AbC123").unwrap() <= 3600);
    }

    #[tokio::test]
    async fn test_warm_cache_skips_durable_read() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code().times(0);

        let cache = Arc::new(MemoryCache::new());
        cache
            .set_ex("shorturl:AbC123", "https://example.com", 60)
            .await
            .unwrap();

        let resolver = RedirectResolver::new(Arc::new(urls), cache, 3600);
        let url = resolver.resolve("AbC123").await.unwrap();

        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_expired_record_is_not_found_on_cold_path() {
        // A warm cache may still serve an entry populated before expiry for
        // up to its TTL; the cold path must never do so.
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code().times(1).returning(|code| {
            Ok(Some(stored(
                code,
                "https://example.com",
                Some(Utc::now() - Duration::hours(1)),
            )))
        });

        let cache = Arc::new(MemoryCache::new());
        let resolver = RedirectResolver::new(Arc::new(urls), cache.clone(), 3600);

        let result = resolver.resolve("AbC123").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));

        // Nothing was cached for the expired record.
        assert_eq!(cache.get("shorturl:AbC123").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ttl_bounded_by_expiry() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code().times(1).returning(|code| {
            Ok(Some(stored(
                code,
                "https://example.com",
                Some(Utc::now() + Duration::seconds(120)),
            )))
        });

        let cache = Arc::new(MemoryCache::new());
        let resolver = RedirectResolver::new(Arc::new(urls), cache.clone(), 3600);

        resolver.resolve("AbC123").await.unwrap();

        assert!(cache.ttl_seconds("shorturl:AbC123").unwrap() <= 120);
    }

    #[tokio::test]
    async fn test_absent_code_is_not_found() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code().times(1).returning(|_| Ok(None));

        let resolver = RedirectResolver::new(Arc::new(urls), Arc::new(MemoryCache::new()), 3600);

        let result = resolver.resolve("nope").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_storage_error_surfaces_distinctly() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code()
            .times(1)
            .returning(|_| Err(AppError::storage("Database unreachable", json!({}))));

        let resolver = RedirectResolver::new(Arc::new(urls), Arc::new(MemoryCache::new()), 3600);

        let result = resolver.resolve("AbC123").await;
        assert!(matches!(result.unwrap_err(), AppError::Storage { .. }));
    }

    /// Cache whose every operation fails, for exercising degradation paths.
    struct BrokenCache;

    #[async_trait::async_trait]
    impl CacheService for BrokenCache {
        async fn get(
            &self,
            _key: &str,
        ) -> crate::infrastructure::cache::CacheResult<Option<String>> {
            Err(crate::infrastructure::cache::CacheError::Connection(
                "down".into(),
            ))
        }
        async fn set_ex(
            &self,
            _key: &str,
            _value: &str,
            _ttl: u64,
        ) -> crate::infrastructure::cache::CacheResult<()> {
            Err(crate::infrastructure::cache::CacheError::Connection(
                "down".into(),
            ))
        }
        async fn incr(
            &self,
            _key: &str,
            _delta: i64,
        ) -> crate::infrastructure::cache::CacheResult<i64> {
            Err(crate::infrastructure::cache::CacheError::Connection(
                "down".into(),
            ))
        }
        async fn del(&self, _key: &str) -> crate::infrastructure::cache::CacheResult<()> {
            Err(crate::infrastructure::cache::CacheError::Connection(
                "down".into(),
            ))
        }
        async fn scan_keys(
            &self,
            _pattern: &str,
        ) -> crate::infrastructure::cache::CacheResult<Vec<String>> {
            Err(crate::infrastructure::cache::CacheError::Connection(
                "down".into(),
            ))
        }
        async fn health_check(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn test_cache_failure_never_fails_the_request() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(stored(code, "https://example.com", None))));

        let resolver = RedirectResolver::new(Arc::new(urls), Arc::new(BrokenCache), 3600);

        // Both the failed get and the failed set are swallowed.
        let url = resolver.resolve("AbC123").await.unwrap();
        assert_eq!(url, "https://example.com");
    }
}
