//! Caching layer: redirect acceleration and click-counter buffering.
//!
//! Provides a [`CacheService`] trait with three implementations:
//! - [`RedisCache`] - production Redis-backed cache
//! - [`MemoryCache`] - in-process cache for tests and single-node setups
//! - [`NullCache`] - no-op implementation for disabled caching

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{
    counter_key, redirect_key, CacheError, CacheResult, CacheService, COUNTER_KEY_PREFIX,
    REDIRECT_KEY_PREFIX,
};
