//! Infrastructure layer: cache, messaging, and persistence integrations.

pub mod cache;
pub mod messaging;
pub mod persistence;
