//! PostgreSQL implementations of the access-log and notification stores.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewAccessLogEntry, NewNotification};
use crate::domain::repositories::{AccessLogRepository, NotificationRepository};
use crate::error::AppError;

/// Append-only PostgreSQL store of access-log rows.
pub struct PgAccessLogRepository {
    pool: Arc<PgPool>,
}

impl PgAccessLogRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessLogRepository for PgAccessLogRepository {
    async fn append(&self, entry: NewAccessLogEntry) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO url_access_logs (code, observed_at)
            VALUES ($1, $2)
            "#,
        )
        .bind(&entry.code)
        .bind(entry.observed_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}

/// Append-only PostgreSQL store of notifications.
pub struct PgNotificationRepository {
    pool: Arc<PgPool>,
}

impl PgNotificationRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn append(&self, notification: NewNotification) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO url_notifications (code, kind, message, status)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&notification.code)
        .bind(&notification.kind)
        .bind(&notification.message)
        .bind(&notification.status)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
