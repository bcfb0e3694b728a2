//! Periodic reconciliation of buffered click counters into the durable store.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, COUNTER_KEY_PREFIX};
use crate::utils::coerce::coerce_count;

/// Drains `click:*` counters from the cache into durable click totals.
///
/// Each key is processed independently: one key's failure is logged and does
/// not abort its siblings. A counter key is deleted only after the durable
/// outcome is settled, so crediting is at-least-once: deltas are never lost,
/// and only a delete that fails after a successful add can overcount (by one
/// flush). Hits arriving between the read and the delete are re-buffered
/// under a fresh counter and picked up on the next pass.
pub struct ClickReconciler {
    cache: Arc<dyn CacheService>,
    urls: Arc<dyn UrlRepository>,
}

impl ClickReconciler {
    pub fn new(cache: Arc<dyn CacheService>, urls: Arc<dyn UrlRepository>) -> Self {
        Self { cache, urls }
    }

    /// Runs the reconciler until the process exits.
    ///
    /// Ticks are single-flight by construction: each tick is awaited before
    /// the next timer fire is observed, and missed ticks are skipped rather
    /// than bursted.
    pub async fn run(self, interval: Duration) {
        info!("Click reconciler started (interval: {:?})", interval);

        let mut timer = tokio::time::interval(interval);
        timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            timer.tick().await;
            self.tick().await;
        }
    }

    /// One reconciliation pass. Idempotent: with no new hits between runs, a
    /// second pass finds no counters and changes nothing.
    pub async fn tick(&self) {
        let keys = match self.cache.scan_keys(&format!("{}*", COUNTER_KEY_PREFIX)).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Counter scan failed, skipping pass: {}", e);
                return;
            }
        };

        if keys.is_empty() {
            return;
        }

        for key in keys {
            if let Err(e) = self.flush_key(&key).await {
                warn!("Failed to flush {}: {}", key, e);
            }
        }
    }

    /// Flushes a single counter key: read, coerce, add durably, delete.
    async fn flush_key(&self, key: &str) -> Result<(), AppError> {
        let Some(code) = key.strip_prefix(COUNTER_KEY_PREFIX) else {
            return Ok(());
        };

        let raw = self
            .cache
            .get(key)
            .await
            .map_err(|e| AppError::internal(e.to_string(), serde_json::json!({})))?;

        let delta = raw.as_deref().and_then(coerce_count).unwrap_or(0);
        if delta <= 0 {
            return Ok(());
        }

        match self.urls.add_clicks(code, delta).await {
            Ok(total) => {
                debug!("Flushed {} clicks for {} (total: {})", delta, code, total);
            }
            Err(AppError::NotFound { .. }) => {
                // The code no longer exists durably; the pending delta has
                // nowhere to go. Drop it and clear the key so it does not
                // accumulate forever.
                warn!("Dropping {} buffered clicks for unknown code {}", delta, code);
            }
            Err(e) => return Err(e),
        }

        // Delete only after the durable outcome is settled. A failed delete
        // leaves the already-credited counter for the next pass, which re-adds
        // it: crediting is at-least-once, so deltas are never lost but this
        // path can overcount by one flush.
        self.cache
            .del(key)
            .await
            .map_err(|e| AppError::internal(e.to_string(), serde_json::json!({})))
    }
}
