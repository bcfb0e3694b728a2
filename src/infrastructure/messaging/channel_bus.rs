//! In-process event bus backed by tokio channels.

use super::service::{BusResult, EventBus};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// An [`EventBus`] that delivers payloads through in-process mpsc channels.
///
/// Used by tests and by deployments that run the consumer in the same
/// process without an external broker. Publishing to a channel with no
/// subscribers drops the payload, matching broker semantics.
#[derive(Default)]
pub struct ChannelBus {
    subscribers: Mutex<HashMap<String, Vec<mpsc::Sender<String>>>>,
}

impl ChannelBus {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventBus for ChannelBus {
    async fn publish(&self, channel: &str, payload: &str) -> BusResult<()> {
        // Snapshot senders first; the lock must not be held across await.
        let senders: Vec<mpsc::Sender<String>> = {
            let subscribers = self.subscribers.lock().expect("bus lock poisoned");
            subscribers.get(channel).cloned().unwrap_or_default()
        };

        let mut closed = false;
        for tx in &senders {
            if tx.send(payload.to_string()).await.is_err() {
                closed = true;
            }
        }

        if closed {
            let mut subscribers = self.subscribers.lock().expect("bus lock poisoned");
            if let Some(list) = subscribers.get_mut(channel) {
                list.retain(|tx| !tx.is_closed());
            }
        }

        Ok(())
    }

    async fn subscribe(&self, channel: &str) -> BusResult<mpsc::Receiver<String>> {
        let (tx, rx) = mpsc::channel(1024);
        let mut subscribers = self.subscribers.lock().expect("bus lock poisoned");
        subscribers.entry(channel.to_string()).or_default().push(tx);
        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = ChannelBus::new();
        let mut rx = bus.subscribe("t").await.unwrap();

        bus.publish("t", "hello").await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_dropped() {
        let bus = ChannelBus::new();
        assert!(bus.publish("t", "hello").await.is_ok());
    }

    #[tokio::test]
    async fn test_channels_are_isolated() {
        let bus = ChannelBus::new();
        let mut a = bus.subscribe("a").await.unwrap();
        let mut b = bus.subscribe("b").await.unwrap();

        bus.publish("a", "for-a").await.unwrap();

        assert_eq!(a.recv().await.unwrap(), "for-a");
        assert!(b.try_recv().is_err());
    }
}
