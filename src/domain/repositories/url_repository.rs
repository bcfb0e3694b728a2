//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the durable code → URL mapping.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new short URL row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists (the shorten
    /// path treats this as a generation collision and retries).
    /// Returns [`AppError::Storage`] if the store is unreachable.
    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Finds a short URL by its code.
    ///
    /// Expiry is not filtered here; callers decide what an expired row means
    /// (the resolver hides it, the reconciler still credits its clicks).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] / [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Atomically adds `delta` to the row's click total and returns the new total.
    ///
    /// Must be a single atomic increment at the store; concurrent
    /// reconciliation passes touching the same code must not lose updates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row matches the code.
    async fn add_clicks(&self, code: &str, delta: i64) -> Result<i64, AppError>;
}
