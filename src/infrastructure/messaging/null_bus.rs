//! No-op event bus for disabled messaging.

use super::service::{BusResult, EventBus};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

/// An [`EventBus`] that discards everything.
///
/// Publishes succeed without delivering; subscriptions yield a receiver that
/// ends immediately.
pub struct NullBus;

impl NullBus {
    pub fn new() -> Self {
        debug!("Using NullBus (messaging disabled)");
        Self
    }
}

impl Default for NullBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for NullBus {
    async fn publish(&self, _channel: &str, _payload: &str) -> BusResult<()> {
        Ok(())
    }

    async fn subscribe(&self, _channel: &str) -> BusResult<mpsc::Receiver<String>> {
        let (_tx, rx) = mpsc::channel(1);
        Ok(rx)
    }
}
