//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache and bus setup, background task
//! spawning, and the Axum server lifecycle.

use crate::application::services::{
    AccessEventPublisher, AccessLogConsumer, ClickReconciler, ClickTracker, RedirectResolver,
    ShortenService,
};
use crate::config::Config;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::messaging::{EventBus, NullBus, RedisBus};
use crate::infrastructure::persistence::{
    PgAccessLogRepository, PgNotificationRepository, PgUrlRepository,
};
use crate::api::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool + migrations
/// - Redis cache and event bus (or null fallbacks)
/// - Click reconciler task
/// - Access-log consumer task
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migrations, or server bind
/// fail. Cache/bus connection failures only degrade the service.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let bus: Arc<dyn EventBus> = if let Some(redis_url) = &config.redis_url {
        match RedisBus::connect(redis_url).await {
            Ok(redis) => Arc::new(redis),
            Err(e) => {
                tracing::warn!("Failed to connect event bus: {}. Using NullBus.", e);
                Arc::new(NullBus::new())
            }
        }
    } else {
        tracing::info!("Messaging disabled (NullBus)");
        Arc::new(NullBus::new())
    };

    let pool = Arc::new(pool);
    let urls = Arc::new(PgUrlRepository::new(pool.clone()));
    let access_logs = Arc::new(PgAccessLogRepository::new(pool.clone()));
    let notifications = Arc::new(PgNotificationRepository::new(pool.clone()));

    let reconciler = ClickReconciler::new(cache.clone(), urls.clone());
    tokio::spawn(reconciler.run(Duration::from_secs(config.reconcile_interval_seconds)));

    let consumer = AccessLogConsumer::new(access_logs, notifications);
    tokio::spawn(consumer.run(bus.clone()));

    let state = AppState {
        db: pool,
        urls: urls.clone(),
        cache: cache.clone(),
        shorten: Arc::new(ShortenService::with_max_attempts(
            urls.clone(),
            config.code_max_attempts,
        )),
        resolver: Arc::new(RedirectResolver::new(
            urls,
            cache.clone(),
            config.cache_ttl_seconds,
        )),
        tracker: Arc::new(ClickTracker::new(cache)),
        publisher: Arc::new(AccessEventPublisher::new(bus)),
        base_url: config.base_url.clone(),
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
