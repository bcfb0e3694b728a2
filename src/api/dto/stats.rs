//! DTO for the per-code stats endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::ShortUrl;

/// Response body for `GET /api/stats/{code}`.
///
/// `click_total` is the durable total; clicks still buffered in the cache
/// appear after the next reconciliation pass.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_total: i64,
}

impl From<ShortUrl> for StatsResponse {
    fn from(url: ShortUrl) -> Self {
        Self {
            code: url.code,
            long_url: url.long_url,
            created_at: url.created_at,
            expires_at: url.expires_at,
            click_total: url.click_total,
        }
    }
}
