//! Key-value persistence for short links.
//!
//! Every link lives under exactly one key (its short code), so the store only
//! has to be atomic per key.

mod memory;
mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Minimal key-value interface the link service is built on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> AppResult<()>;

    /// Store `value` under `key` only if the key is free. Returns whether the
    /// value was written; the check and the write are one atomic step.
    async fn put_if_absent(&self, key: &str, value: &str) -> AppResult<bool>;

    /// Every key/value pair currently stored, in no particular order.
    async fn entries(&self) -> AppResult<Vec<(String, String)>>;

    /// Round-trip to the backend to check connectivity.
    async fn ping(&self) -> AppResult<()>;
}

/// Build the store selected by configuration.
pub async fn connect(config: &StoreConfig) -> AppResult<Arc<dyn KvStore>> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory store; links are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Redis => {
            info!("Connecting to Redis store...");
            let store = RedisStore::new(
                &config.redis_url,
                config.max_connections,
                config.key_prefix.clone(),
            )?;
            Ok(Arc::new(store))
        }
    }
}
