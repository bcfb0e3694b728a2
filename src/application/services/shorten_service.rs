//! Short URL creation service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::debug;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Default bound on collision retries during code generation.
pub const DEFAULT_MAX_ATTEMPTS: usize = 16;

/// Service for creating shortened URLs.
///
/// Generates random codes and enforces uniqueness against the durable store:
/// a candidate is accepted only when `find_by_code` confirms absence, and an
/// insert that still races into a unique violation counts as a collision and
/// retries. The loop is bounded; exhaustion surfaces as
/// [`AppError::GenerationExhausted`] rather than looping forever.
pub struct ShortenService {
    urls: Arc<dyn UrlRepository>,
    max_attempts: usize,
}

impl ShortenService {
    pub fn new(urls: Arc<dyn UrlRepository>) -> Self {
        Self {
            urls,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(urls: Arc<dyn UrlRepository>, max_attempts: usize) -> Self {
        Self { urls, max_attempts }
    }

    /// Creates a short URL for a target, optionally expiring.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the target is not an absolute http(s) URL
    /// - [`AppError::Storage`] if the durable store is unreachable (creation
    ///   fails loudly; no code is invented on failure)
    /// - [`AppError::GenerationExhausted`] if every attempt collided
    pub async fn create_short_url(
        &self,
        long_url: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<ShortUrl, AppError> {
        let long_url = validate_target_url(&long_url)?;

        for attempt in 1..=self.max_attempts {
            let code = generate_code();

            if self.urls.find_by_code(&code).await?.is_some() {
                debug!("Code collision on attempt {}: {}", attempt, code);
                continue;
            }

            match self
                .urls
                .insert(NewShortUrl {
                    code: code.clone(),
                    long_url: long_url.clone(),
                    expires_at,
                })
                .await
            {
                Ok(url) => return Ok(url),
                // A concurrent writer took the code between the check and the
                // insert; draw again.
                Err(AppError::Conflict { .. }) => {
                    debug!("Insert race on attempt {}: {}", attempt, code);
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }
}

/// Validates and normalizes the target URL.
fn validate_target_url(raw: &str) -> Result<String, AppError> {
    let parsed = url::Url::parse(raw).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AppError::bad_request(
            "Only http and https URLs can be shortened",
            json!({ "scheme": parsed.scheme() }),
        ));
    }

    Ok(parsed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;

    fn stored(code: &str, url: &str) -> ShortUrl {
        ShortUrl::new(1, code.to_string(), url.to_string(), Utc::now(), None, 0)
    }

    #[tokio::test]
    async fn test_create_short_url_success() {
        let mut urls = MockUrlRepository::new();

        urls.expect_find_by_code().times(1).returning(|_| Ok(None));
        urls.expect_insert()
            .times(1)
            .returning(|new_url| Ok(stored(&new_url.code, &new_url.long_url)));

        let service = ShortenService::new(Arc::new(urls));
        let url = service
            .create_short_url("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(url.long_url, "https://example.com/");
        assert_eq!(url.code.len(), 6);
    }

    #[tokio::test]
    async fn test_collision_forces_second_draw() {
        let mut urls = MockUrlRepository::new();

        // First candidate is taken; the second draw must happen and succeed.
        let mut hits = 0;
        urls.expect_find_by_code().times(2).returning(move |code| {
            hits += 1;
            if hits == 1 {
                Ok(Some(stored(code, "https://taken.example.com")))
            } else {
                Ok(None)
            }
        });
        urls.expect_insert()
            .times(1)
            .returning(|new_url| Ok(stored(&new_url.code, &new_url.long_url)));

        let service = ShortenService::new(Arc::new(urls));
        let result = service
            .create_short_url("https://example.com".to_string(), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_insert_race_is_retried() {
        let mut urls = MockUrlRepository::new();

        urls.expect_find_by_code().times(2).returning(|_| Ok(None));
        let mut inserts = 0;
        urls.expect_insert().times(2).returning(move |new_url| {
            inserts += 1;
            if inserts == 1 {
                Err(AppError::conflict("Unique constraint violation", json!({})))
            } else {
                Ok(stored(&new_url.code, &new_url.long_url))
            }
        });

        let service = ShortenService::new(Arc::new(urls));
        let result = service
            .create_short_url("https://example.com".to_string(), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_exhaustion_after_bounded_attempts() {
        let mut urls = MockUrlRepository::new();

        urls.expect_find_by_code()
            .times(3)
            .returning(|code| Ok(Some(stored(code, "https://taken.example.com"))));
        urls.expect_insert().times(0);

        let service = ShortenService::with_max_attempts(Arc::new(urls), 3);
        let result = service
            .create_short_url("https://example.com".to_string(), None)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::GenerationExhausted { attempts: 3 }
        ));
    }

    #[tokio::test]
    async fn test_storage_error_propagates() {
        let mut urls = MockUrlRepository::new();

        urls.expect_find_by_code()
            .times(1)
            .returning(|_| Err(AppError::storage("Database unreachable", json!({}))));

        let service = ShortenService::new(Arc::new(urls));
        let result = service
            .create_short_url("https://example.com".to_string(), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_invalid_url_rejected() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code().times(0);

        let service = ShortenService::new(Arc::new(urls));
        let result = service.create_short_url("not-a-url".to_string(), None).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_non_http_scheme_rejected() {
        let urls = MockUrlRepository::new();

        let service = ShortenService::new(Arc::new(urls));
        let result = service
            .create_short_url("ftp://example.com/file".to_string(), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }
}
