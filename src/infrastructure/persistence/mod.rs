//! PostgreSQL repository implementations.

mod pg_access_log_repository;
mod pg_url_repository;

pub use pg_access_log_repository::{PgAccessLogRepository, PgNotificationRepository};
pub use pg_url_repository::PgUrlRepository;
