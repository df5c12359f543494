use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::info;

use super::{KeyValueStore, StorageError};

/// Redis-backed store. Every key is namespaced under `prefix`.
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
    prefix: String,
}

impl RedisStore {
    pub async fn connect(redis_url: &str, prefix: impl Into<String>) -> Result<Self, StorageError> {
        let client = redis::Client::open(redis_url)?;
        let connection = client.get_multiplexed_async_connection().await?;
        let prefix = prefix.into();
        info!("Redis store connected (key prefix '{prefix}')");
        Ok(Self { connection, prefix })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(self.namespaced(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut conn = self.connection.clone();
        conn.set::<_, _, ()>(self.namespaced(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.connection.clone();
        conn.del::<_, ()>(self.namespaced(key)).await?;
        Ok(())
    }
}
