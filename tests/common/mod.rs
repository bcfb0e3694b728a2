#![allow(dead_code)]

//! In-memory collaborator implementations for integration tests.
//!
//! These stand in for PostgreSQL so the full pipeline (shorten → resolve →
//! click buffering → reconciliation → event consumption) can be exercised
//! without external services.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use snaplink::domain::entities::{NewAccessLogEntry, NewNotification, NewShortUrl, ShortUrl};
use snaplink::domain::repositories::{
    AccessLogRepository, NotificationRepository, UrlRepository,
};
use snaplink::error::AppError;

/// In-memory [`UrlRepository`] keyed by code.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    rows: Mutex<HashMap<String, ShortUrl>>,
    next_id: AtomicI64,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Seeds a row directly, bypassing the uniqueness check.
    pub fn seed(&self, code: &str, long_url: &str, expires_at: Option<DateTime<Utc>>) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        rows.insert(
            code.to_string(),
            ShortUrl::new(
                id,
                code.to_string(),
                long_url.to_string(),
                Utc::now(),
                expires_at,
                0,
            ),
        );
    }

    pub fn click_total(&self, code: &str) -> Option<i64> {
        let rows = self.rows.lock().unwrap();
        rows.get(code).map(|r| r.click_total)
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&new_url.code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "code": new_url.code }),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let url = ShortUrl::new(
            id,
            new_url.code.clone(),
            new_url.long_url,
            Utc::now(),
            new_url.expires_at,
            0,
        );
        rows.insert(new_url.code, url.clone());
        Ok(url)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.get(code).cloned())
    }

    async fn add_clicks(&self, code: &str, delta: i64) -> Result<i64, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows.get_mut(code).ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "code": code }))
        })?;
        row.click_total += delta;
        Ok(row.click_total)
    }
}

/// In-memory append-only access log.
#[derive(Default, Clone)]
pub struct InMemoryAccessLog {
    pub rows: Arc<Mutex<Vec<NewAccessLogEntry>>>,
}

impl InMemoryAccessLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl AccessLogRepository for InMemoryAccessLog {
    async fn append(&self, entry: NewAccessLogEntry) -> Result<(), AppError> {
        self.rows.lock().unwrap().push(entry);
        Ok(())
    }
}

/// In-memory append-only notification store.
#[derive(Default, Clone)]
pub struct InMemoryNotifications {
    pub rows: Arc<Mutex<Vec<NewNotification>>>,
}

impl InMemoryNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotifications {
    async fn append(&self, notification: NewNotification) -> Result<(), AppError> {
        self.rows.lock().unwrap().push(notification);
        Ok(())
    }
}
