//! Fast-path click aggregation.

use std::sync::Arc;

use tracing::warn;

use crate::infrastructure::cache::{counter_key, CacheService};

/// Buffers click counts in the cache on every hit.
///
/// This is the sole fast-path write: one atomic increment at `click:<code>`,
/// no durable write. Multiple hits coalesce into a single delta that the
/// reconciler later folds into the durable total. Cache failures are
/// swallowed here so a redirect is never blocked or failed by counting.
pub struct ClickTracker {
    cache: Arc<dyn CacheService>,
}

impl ClickTracker {
    pub fn new(cache: Arc<dyn CacheService>) -> Self {
        Self { cache }
    }

    /// Records one hit for a code. Fire-and-forget.
    pub async fn record_hit(&self, code: &str) {
        let key = counter_key(code);
        if let Err(e) = self.cache.incr(&key, 1).await {
            warn!("Failed to buffer click for {}: {}", code, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::MemoryCache;

    #[tokio::test]
    async fn test_hits_accumulate_in_counter_key() {
        let cache = Arc::new(MemoryCache::new());
        let tracker = ClickTracker::new(cache.clone());

        tracker.record_hit("AbC123").await;
        tracker.record_hit("AbC123").await;
        tracker.record_hit("AbC123").await;

        assert_eq!(
            cache.get("click:AbC123").await.unwrap(),
            Some("3".to_string())
        );
    }

    #[tokio::test]
    async fn test_codes_are_counted_independently() {
        let cache = Arc::new(MemoryCache::new());
        let tracker = ClickTracker::new(cache.clone());

        tracker.record_hit("a").await;
        tracker.record_hit("b").await;
        tracker.record_hit("b").await;

        assert_eq!(cache.get("click:a").await.unwrap(), Some("1".to_string()));
        assert_eq!(cache.get("click:b").await.unwrap(), Some("2".to_string()));
    }

    #[tokio::test]
    async fn test_concurrent_hits_are_not_lost() {
        let cache = Arc::new(MemoryCache::new());
        let tracker = Arc::new(ClickTracker::new(cache.clone()));

        let mut handles = Vec::new();
        for _ in 0..50 {
            let tracker = tracker.clone();
            handles.push(tokio::spawn(async move {
                tracker.record_hit("AbC123").await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(
            cache.get("click:AbC123").await.unwrap(),
            Some("50".to_string())
        );
    }
}
