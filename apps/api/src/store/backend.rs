//! Snapshot backends. Redis in production, an in-process map for tests and local runs.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::info;

use crate::errors::AppError;

/// Raw key/value persistence for encoded snapshots.
#[async_trait]
pub trait SnapshotBackend: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn save(&self, key: &str, snapshot: String) -> Result<(), AppError>;
}

pub struct RedisBackend {
    conn: MultiplexedConnection,
}

impl RedisBackend {
    /// Opens a multiplexed connection shared by every request.
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        info!("Connecting to Redis...");
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Redis connection established");
        Ok(Self { conn })
    }
}

#[async_trait]
impl SnapshotBackend for RedisBackend {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.conn.clone();
        Ok(conn.get(key).await?)
    }

    async fn save(&self, key: &str, snapshot: String) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, snapshot).await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl SnapshotBackend for MemoryBackend {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, snapshot: String) -> Result<(), AppError> {
        self.entries.write().await.insert(key.to_string(), snapshot);
        Ok(())
    }
}
