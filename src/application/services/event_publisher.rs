//! Fire-and-forget publication of access events.

use std::sync::Arc;

use tracing::warn;

use crate::domain::entities::AccessEvent;
use crate::infrastructure::messaging::{EventBus, ACCESS_EVENT_CHANNEL};

/// Publishes one [`AccessEvent`] per redirect hit.
///
/// Failures are swallowed: the redirect must not fail because of logging
/// infrastructure. Delivery is at-least-once downstream; the consumer owns
/// duplicate tolerance.
pub struct AccessEventPublisher {
    bus: Arc<dyn EventBus>,
}

impl AccessEventPublisher {
    pub fn new(bus: Arc<dyn EventBus>) -> Self {
        Self { bus }
    }

    /// Publishes an access event for a code, stamped with the current time.
    pub async fn publish(&self, code: &str) {
        let event = AccessEvent::now(code);

        let payload = match serde_json::to_string(&event) {
            Ok(p) => p,
            Err(e) => {
                warn!("Failed to serialize access event for {}: {}", code, e);
                return;
            }
        };

        if let Err(e) = self.bus.publish(ACCESS_EVENT_CHANNEL, &payload).await {
            warn!("Failed to publish access event for {}: {}", code, e);
        }
    }
}
