//! DTOs for the shorten endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::ShortUrl;

/// Request body for `POST /api/shorten`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten.
    #[validate(url(message = "must be a valid URL"))]
    pub url: String,
    /// Optional expiry; omitted means the link never expires.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Response body for `POST /api/shorten`.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_total: i64,
}

impl ShortenResponse {
    pub fn from_entity(url: ShortUrl, base_url: &str) -> Self {
        Self {
            short_url: format!("{}/{}", base_url.trim_end_matches('/'), url.code),
            code: url.code,
            long_url: url.long_url,
            created_at: url.created_at,
            expires_at: url.expires_at,
            click_total: url.click_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_url_construction() {
        let entity = ShortUrl::new(
            1,
            "AbC123".to_string(),
            "https://example.com".to_string(),
            Utc::now(),
            None,
            0,
        );

        let response = ShortenResponse::from_entity(entity, "https://sn.ap/");
        assert_eq!(response.short_url, "https://sn.ap/AbC123");
    }

    #[test]
    fn test_request_validation() {
        let ok = ShortenRequest {
            url: "https://example.com".to_string(),
            expires_at: None,
        };
        assert!(ok.validate().is_ok());

        let bad = ShortenRequest {
            url: "definitely not a url".to_string(),
            expires_at: None,
        };
        assert!(bad.validate().is_err());
    }
}
