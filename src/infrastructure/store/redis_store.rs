//! Redis-backed key-value store.

use super::service::{KeyValueStore, StoreCommand, StoreError, StoreResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

/// Redis implementation of [`KeyValueStore`].
///
/// Uses `ConnectionManager` for connection reuse and automatic reconnection.
/// Unlike a read-through cache, every error is propagated: the components
/// built on top decide how to surface it.
#[derive(Clone)]
pub struct RedisStore {
    client: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379/0"`)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConnectionError`] if the URL is invalid, the connection
    /// cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> StoreResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            StoreError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let mut conn = self.client.clone();
        conn.set::<_, _, ()>(key, value).await?;
        debug!("SET {} ({} bytes)", key, value.len());
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut conn = self.client.clone();
        let value = conn.get::<_, Option<Vec<u8>>>(key).await?;
        debug!("GET {} -> {}", key, if value.is_some() { "hit" } else { "nil" });
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &[u8], ttl_seconds: u64) -> StoreResult<()> {
        let mut conn = self.client.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds).await?;
        debug!("SETEX {} (TTL: {}s)", key, ttl_seconds);
        Ok(())
    }

    async fn incr(&self, key: &str) -> StoreResult<i64> {
        let mut conn = self.client.clone();
        Ok(conn.incr::<_, _, i64>(key, 1).await?)
    }

    async fn rpush(&self, key: &str, value: &str) -> StoreResult<i64> {
        let mut conn = self.client.clone();
        Ok(conn.rpush::<_, _, i64>(key, value).await?)
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> StoreResult<Vec<String>> {
        let mut conn = self.client.clone();
        Ok(conn.lrange::<_, Vec<String>>(key, start, stop).await?)
    }

    /// Sends the batch as `MULTI`/`EXEC`. Redis does not roll back: commands
    /// that succeeded stay applied if a later one fails at runtime.
    async fn exec_atomic(&self, commands: Vec<StoreCommand>) -> StoreResult<()> {
        let mut pipe = redis::pipe();
        pipe.atomic();

        for command in &commands {
            match command {
                StoreCommand::Incr(key) => {
                    pipe.incr(key, 1).ignore();
                }
                StoreCommand::RPush { key, value } => {
                    pipe.rpush(key, value).ignore();
                }
            }
        }

        let mut conn = self.client.clone();
        pipe.query_async::<()>(&mut conn).await.map_err(|e| {
            warn!("Redis MULTI/EXEC of {} commands failed: {}", commands.len(), e);
            StoreError::from(e)
        })
    }

    async fn flush_db(&self) -> StoreResult<()> {
        let mut conn = self.client.clone();
        redis::cmd("FLUSHDB").query_async::<()>(&mut conn).await?;
        warn!("Redis database flushed");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
