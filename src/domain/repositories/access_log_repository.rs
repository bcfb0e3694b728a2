//! Repository traits for the rows the event consumer persists.

use crate::domain::entities::{NewAccessLogEntry, NewNotification};
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only store of access-log entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessLogRepository: Send + Sync {
    /// Appends one access-log row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] / [`AppError::Internal`] on database errors.
    async fn append(&self, entry: NewAccessLogEntry) -> Result<(), AppError>;
}

/// Append-only store of notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Appends one notification row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] / [`AppError::Internal`] on database errors.
    async fn append(&self, notification: NewNotification) -> Result<(), AppError>;
}
