//! Background consumer persisting access-log and notification rows.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewAccessLogEntry, NewNotification};
use crate::domain::repositories::{AccessLogRepository, NotificationRepository};
use crate::error::AppError;
use crate::infrastructure::messaging::{EventBus, ACCESS_EVENT_CHANNEL};
use crate::utils::coerce::coerce_timestamp;

/// Why a delivered payload was dropped.
///
/// Either way the message is considered handled: dropping a log entry is
/// preferred over redelivery storms or unbounded queue growth.
#[derive(Debug, thiserror::Error)]
pub enum ConsumeError {
    #[error("malformed event: {0}")]
    Malformed(String),
    #[error("storage failure: {0}")]
    Storage(#[from] AppError),
}

/// Consumes access events and writes one access-log row plus one VISIT
/// notification per delivery.
///
/// Deliveries are processed one at a time. Processing errors are logged and
/// the message is dropped, never requeued. Duplicates from at-least-once
/// delivery produce duplicate rows, which the append-only tables tolerate;
/// click totals are unaffected because they flow through the counter path.
pub struct AccessLogConsumer {
    logs: Arc<dyn AccessLogRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl AccessLogConsumer {
    pub fn new(
        logs: Arc<dyn AccessLogRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            logs,
            notifications,
        }
    }

    /// Subscribes to the access-event channel and consumes until the bus
    /// closes the stream.
    pub async fn run(self, bus: Arc<dyn EventBus>) {
        let mut rx = match bus.subscribe(ACCESS_EVENT_CHANNEL).await {
            Ok(rx) => rx,
            Err(e) => {
                warn!("Access-log consumer failed to subscribe: {}", e);
                return;
            }
        };

        info!("Access-log consumer started");

        while let Some(payload) = rx.recv().await {
            if let Err(e) = self.handle_payload(&payload).await {
                warn!("Dropping access event: {}", e);
            }
        }

        info!("Access-log consumer stopped (bus closed)");
    }

    /// Processes one delivered payload.
    ///
    /// The timestamp field is decoded leniently (see
    /// [`crate::utils::coerce::coerce_timestamp`]); absent or unparseable
    /// timestamps default to the current time. A missing `code` makes the
    /// whole payload malformed and nothing is persisted.
    pub async fn handle_payload(&self, payload: &str) -> Result<(), ConsumeError> {
        let value: serde_json::Value = serde_json::from_str(payload)
            .map_err(|e| ConsumeError::Malformed(format!("invalid JSON: {}", e)))?;

        let code = value
            .get("code")
            .and_then(|c| c.as_str())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ConsumeError::Malformed("missing code field".to_string()))?
            .to_string();

        let observed_at = coerce_timestamp(value.get("observed_at")).unwrap_or_else(Utc::now);

        self.logs
            .append(NewAccessLogEntry {
                code: code.clone(),
                observed_at,
            })
            .await?;

        self.notifications.append(NewNotification::visit(&code)).await?;

        debug!("Persisted access event for {}", code);
        Ok(())
    }
}
