//! Repository traits defining the durable-store contract.

mod access_log_repository;
mod url_repository;

pub use access_log_repository::{AccessLogRepository, NotificationRepository};
pub use url_repository::UrlRepository;

#[cfg(test)]
pub use access_log_repository::{MockAccessLogRepository, MockNotificationRepository};
#[cfg(test)]
pub use url_repository::MockUrlRepository;
