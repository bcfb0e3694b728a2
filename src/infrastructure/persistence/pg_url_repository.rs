//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use serde_json::json;

/// PostgreSQL repository for short URL storage and retrieval.
///
/// Queries are runtime-bound so the crate builds without a live database;
/// `urls.code` carries a unique constraint that backs the uniqueness
/// invariant of code generation.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let url = sqlx::query_as::<_, ShortUrl>(
            r#"
            INSERT INTO urls (code, long_url, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, code, long_url, created_at, expires_at, click_total
            "#,
        )
        .bind(&new_url.code)
        .bind(&new_url.long_url)
        .bind(new_url.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        let url = sqlx::query_as::<_, ShortUrl>(
            r#"
            SELECT id, code, long_url, created_at, expires_at, click_total
            FROM urls
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn add_clicks(&self, code: &str, delta: i64) -> Result<i64, AppError> {
        // Single atomic UPDATE; concurrent reconciliation passes for the same
        // code serialize at the row and neither loses its delta.
        let total: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE urls
            SET click_total = click_total + $2
            WHERE code = $1
            RETURNING click_total
            "#,
        )
        .bind(code)
        .bind(delta)
        .fetch_optional(self.pool.as_ref())
        .await?;

        total.ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "code": code }))
        })
    }
}
