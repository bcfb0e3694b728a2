//! Shared application state handed to every handler.

use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::{
    AccessEventPublisher, ClickTracker, RedirectResolver, ShortenService,
};
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub urls: Arc<dyn UrlRepository>,
    pub cache: Arc<dyn CacheService>,
    pub shorten: Arc<ShortenService>,
    pub resolver: Arc<RedirectResolver>,
    pub tracker: Arc<ClickTracker>,
    pub publisher: Arc<AccessEventPublisher>,
    pub base_url: String,
}
