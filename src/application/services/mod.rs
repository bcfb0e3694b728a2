//! Application services orchestrating the redirect and counting pipelines.

mod access_log_consumer;
mod click_tracker;
mod event_publisher;
mod reconciler;
mod redirect_resolver;
mod shorten_service;

pub use access_log_consumer::{AccessLogConsumer, ConsumeError};
pub use click_tracker::ClickTracker;
pub use event_publisher::AccessEventPublisher;
pub use reconciler::ClickReconciler;
pub use redirect_resolver::RedirectResolver;
pub use shorten_service::{ShortenService, DEFAULT_MAX_ATTEMPTS};
