//! Durable key-value storage for the About page record.
//!
//! `AppState` holds an `Arc<dyn KeyValueStore>`, chosen at startup from
//! `STORAGE_BACKEND`. Writes are last-write-wins; there is no locking across
//! keys.

use async_trait::async_trait;
use thiserror::Error;

pub mod file;
pub mod memory;
pub mod redis_store;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt store file: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Failed to encode value for '{key}': {message}")]
    Encode { key: String, message: String },
}

/// A string-keyed, string-valued store. Values are opaque to the store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
