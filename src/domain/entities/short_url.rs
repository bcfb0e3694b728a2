//! Short URL entity: the durable mapping between a code and its target.

use chrono::{DateTime, Utc};

/// A shortened URL row.
///
/// `click_total` is never written on the request path; it is folded in by the
/// click reconciler from counters buffered in the cache. Expiry is a read-time
/// filter — expired rows stay in the store and are simply never resolved.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShortUrl {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_total: i64,
}

impl ShortUrl {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        code: String,
        long_url: String,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
        click_total: i64,
    ) -> Self {
        Self {
            id,
            code,
            long_url,
            created_at,
            expires_at,
            click_total,
        }
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }

    /// Seconds left until expiry, or `None` for links that never expire.
    ///
    /// Used to derive the cache TTL at population time so a cached entry
    /// cannot outlive the record's expiry by more than the TTL window.
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at
            .map(|e| (e - Utc::now()).num_seconds().max(0))
    }
}

/// Input data for creating a new short URL.
#[derive(Debug, Clone)]
pub struct NewShortUrl {
    pub code: String,
    pub long_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}
