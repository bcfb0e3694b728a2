//! Messaging layer for the access-event pipeline.
//!
//! Provides an [`EventBus`] trait with three implementations:
//! - [`RedisBus`] - Redis pub/sub
//! - [`ChannelBus`] - in-process tokio channels for tests and single-node setups
//! - [`NullBus`] - no-op implementation for disabled messaging

mod channel_bus;
mod null_bus;
mod redis_bus;
mod service;

pub use channel_bus::ChannelBus;
pub use null_bus::NullBus;
pub use redis_bus::RedisBus;
pub use service::{BusError, BusResult, EventBus, ACCESS_EVENT_CHANNEL};
