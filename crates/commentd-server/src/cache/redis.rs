//! Redis implementation of the comment cache.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{Connection, Pool, Runtime};
use redis::AsyncCommands;

use commentd_storage::{CommentCache, StoreError};

use crate::config::RedisConfig;

/// Comment cache backed by a pooled Redis connection.
///
/// Payloads are stored verbatim with no expiration; an entry lives until it
/// is overwritten, deleted, or evicted by Redis' own policy. Unlike a miss,
/// a connection or command failure is surfaced to the caller.
pub struct RedisCommentCache {
    pool: Pool,
}

impl RedisCommentCache {
    /// Creates a cache over an existing pool.
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Builds a pool from configuration and verifies connectivity.
    pub async fn connect(config: &RedisConfig) -> Result<Self, StoreError> {
        tracing::info!(url = %config.url, "Connecting to Redis");

        let mut redis_config = deadpool_redis::Config::from_url(&config.url);
        let mut pool_config = redis_config.pool.take().unwrap_or_default();
        pool_config.max_size = config.pool_size;
        pool_config.timeouts.wait = Some(Duration::from_millis(config.timeout_ms));
        pool_config.timeouts.create = Some(Duration::from_millis(config.timeout_ms));
        pool_config.timeouts.recycle = Some(Duration::from_millis(config.timeout_ms));
        redis_config.pool = Some(pool_config);

        let pool = redis_config
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| StoreError::unavailable(format!("failed to create Redis pool: {e}")))?;

        // Fail fast: a configured cache that cannot be reached at startup is
        // a deployment problem, not something to paper over per instance.
        pool.get()
            .await
            .map_err(|e| StoreError::unavailable(format!("failed to connect to Redis: {e}")))?;

        tracing::info!("Connected to Redis");

        Ok(Self::new(pool))
    }

    async fn conn(&self) -> Result<Connection, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::unavailable(format!("Redis connection failed: {e}")))
    }
}

#[async_trait]
impl CommentCache for RedisCommentCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.conn().await?;
        conn.get::<_, Option<Vec<u8>>>(key)
            .await
            .map_err(|e| StoreError::unavailable(format!("Redis GET {key} failed: {e}")))
    }

    async fn set(&self, key: &str, payload: Vec<u8>) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        // Plain SET, no expiration.
        conn.set::<_, _, ()>(key, payload)
            .await
            .map_err(|e| StoreError::unavailable(format!("Redis SET {key} failed: {e}")))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        conn.del::<_, ()>(key)
            .await
            .map_err(|e| StoreError::unavailable(format!("Redis DEL {key} failed: {e}")))
    }
}
