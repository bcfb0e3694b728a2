//! Access event message and the rows the consumer derives from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification kind written for every consumed access event.
pub const NOTIFICATION_KIND_VISIT: &str = "VISIT";

/// Initial status of a freshly created notification.
pub const NOTIFICATION_STATUS_PENDING: &str = "PENDING";

/// Transient message published on every redirect hit.
///
/// Serialized as JSON on the event bus. The consumer must tolerate payloads
/// produced by other writers, so deserialization of the timestamp is lenient
/// (see `utils::coerce::coerce_timestamp`) and happens on the raw JSON value
/// rather than through this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessEvent {
    pub code: String,
    pub observed_at: DateTime<Utc>,
}

impl AccessEvent {
    pub fn now(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            observed_at: Utc::now(),
        }
    }
}

/// Append-only access-log row derived from one delivered event.
#[derive(Debug, Clone)]
pub struct NewAccessLogEntry {
    pub code: String,
    pub observed_at: DateTime<Utc>,
}

/// Append-only notification row derived from one delivered event.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub code: String,
    pub kind: String,
    pub message: String,
    pub status: String,
}

impl NewNotification {
    /// Builds the standard VISIT notification for a code.
    pub fn visit(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            message: format!("Short link {} was visited", code),
            code,
            kind: NOTIFICATION_KIND_VISIT.to_string(),
            status: NOTIFICATION_STATUS_PENDING.to_string(),
        }
    }
}
