//! Event bus trait and error types.

use async_trait::async_trait;
use tokio::sync::mpsc;

/// Channel carrying access events from redirect handlers to the consumer.
pub const ACCESS_EVENT_CHANNEL: &str = "snaplink.access";

/// Errors that can occur when talking to the message broker.
///
/// Publishing callers swallow these (a redirect must never fail because of
/// logging infrastructure); subscription failures are fatal to consumer
/// startup only.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("Bus connection error: {0}")]
    Connection(String),
    #[error("Bus operation error: {0}")]
    Operation(String),
}

/// Result type for bus operations.
pub type BusResult<T> = Result<T, BusError>;

/// Trait for fire-and-forget event publication and at-least-once consumption.
///
/// Payloads are opaque strings (JSON in practice). Delivery guarantees beyond
/// "the consumer sees delivered payloads one at a time" belong to the broker,
/// not to this seam; consumers must tolerate duplicates and drop malformed
/// payloads without requeueing.
///
/// # Implementations
///
/// - [`crate::infrastructure::messaging::RedisBus`] - Redis pub/sub
/// - [`crate::infrastructure::messaging::ChannelBus`] - in-process tokio channels
/// - [`crate::infrastructure::messaging::NullBus`] - no-op when messaging is disabled
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publishes a payload on a channel.
    async fn publish(&self, channel: &str, payload: &str) -> BusResult<()>;

    /// Subscribes to a channel, returning a stream of delivered payloads.
    ///
    /// The receiver yields payloads in delivery order; dropping it ends the
    /// subscription.
    async fn subscribe(&self, channel: &str) -> BusResult<mpsc::Receiver<String>>;
}
