//! Redis pub/sub event bus implementation.

use super::service::{BusError, BusResult, EventBus};
use async_trait::async_trait;
use futures_util::StreamExt;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Event bus backed by Redis pub/sub.
///
/// Publishing reuses a pooled connection; each subscription opens a dedicated
/// pub/sub connection whose messages are pumped into an mpsc channel.
pub struct RedisBus {
    client: Client,
    publisher: ConnectionManager,
}

impl RedisBus {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Connection`] if the URL is invalid or the
    /// connection cannot be established.
    pub async fn connect(redis_url: &str) -> BusResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| BusError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let publisher = ConnectionManager::new(client.clone())
            .await
            .map_err(|e| BusError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = publisher.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| BusError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Event bus connected (Redis pub/sub)");

        Ok(Self { client, publisher })
    }
}

#[async_trait]
impl EventBus for RedisBus {
    async fn publish(&self, channel: &str, payload: &str) -> BusResult<()> {
        let mut conn = self.publisher.clone();

        conn.publish::<_, _, ()>(channel, payload)
            .await
            .map_err(|e| BusError::Operation(e.to_string()))
    }

    async fn subscribe(&self, channel: &str) -> BusResult<mpsc::Receiver<String>> {
        let mut pubsub = self
            .client
            .get_async_pubsub()
            .await
            .map_err(|e| BusError::Connection(e.to_string()))?;

        pubsub
            .subscribe(channel)
            .await
            .map_err(|e| BusError::Operation(e.to_string()))?;

        let channel_name = channel.to_string();
        let (tx, rx) = mpsc::channel(1024);

        tokio::spawn(async move {
            let mut stream = pubsub.into_on_message();
            while let Some(msg) = stream.next().await {
                let payload: String = match msg.get_payload() {
                    Ok(p) => p,
                    Err(e) => {
                        warn!("Dropping undecodable message on {}: {}", channel_name, e);
                        continue;
                    }
                };
                if tx.send(payload).await.is_err() {
                    // Receiver dropped, subscription is over.
                    break;
                }
            }
        });

        Ok(rx)
    }
}
