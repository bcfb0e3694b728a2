//! In-process cache implementation.
//!
//! Behaves like a tiny Redis: TTL expiry on read, atomic per-key increments,
//! glob-pattern key scans. Used by tests and by single-node deployments that
//! want click buffering without an external cache.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Instant::now() >= e)
    }
}

/// A thread-safe in-memory [`CacheService`].
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining TTL of a live key in seconds, if it has one.
    ///
    /// Test hook for asserting population TTLs; not part of [`CacheService`].
    pub fn ttl_seconds(&self, key: &str) -> Option<u64> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        let entry = entries.get(key)?;
        if entry.is_expired() {
            return None;
        }
        entry
            .expires_at
            .map(|e| e.saturating_duration_since(Instant::now()).as_secs())
    }
}

/// Glob matcher supporting `*` (any run of characters).
fn glob_match(pattern: &str, key: &str) -> bool {
    let mut parts = pattern.split('*');
    let first = parts.next().unwrap_or("");

    if !key.starts_with(first) {
        return false;
    }
    if !pattern.contains('*') {
        return key == first;
    }

    let mut rest = &key[first.len()..];
    let mut segments: Vec<&str> = parts.collect();
    let last = segments.pop().unwrap_or("");

    for segment in segments {
        match rest.find(segment) {
            Some(idx) => rest = &rest[idx + segment.len()..],
            None => return false,
        }
    }

    rest.ends_with(last)
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Some(Instant::now() + Duration::from_secs(ttl_seconds)),
            },
        );
        Ok(())
    }

    async fn incr(&self, key: &str, delta: i64) -> CacheResult<i64> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");

        let current = match entries.get(key) {
            Some(entry) if !entry.is_expired() => entry
                .value
                .parse::<i64>()
                .map_err(|_| CacheError::Operation(format!("value at {} is not an integer", key)))?,
            _ => 0,
        };

        let next = current + delta;
        entries.insert(
            key.to_string(),
            Entry {
                value: next.to_string(),
                expires_at: None,
            },
        );
        Ok(next)
    }

    async fn del(&self, key: &str) -> CacheResult<()> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.remove(key);
        Ok(())
    }

    async fn scan_keys(&self, pattern: &str) -> CacheResult<Vec<String>> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        Ok(entries
            .iter()
            .filter(|(k, v)| !v.is_expired() && glob_match(pattern, k))
            .map(|(k, _)| k.clone())
            .collect())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
