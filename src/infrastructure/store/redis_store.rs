//! Redis-backed key-value store implementation.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

use super::kv::{CommitOutcome, KvStore, KvWrite, StoreError};

/// Redis implementation of [`KvStore`].
///
/// Plain reads and writes go through a pooled [`ConnectionManager`].
/// Guarded commits need WATCH, which is connection-local state, so each
/// commit attempt runs on a dedicated connection: a WATCH issued on a
/// shared multiplexed connection would be clobbered by interleaved
/// commands from other tasks.
pub struct RedisKvStore {
    client: Client,
    manager: ConnectionManager,
}

impl RedisKvStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client.clone())
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client, manager })
    }
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.manager.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool, StoreError> {
        let mut conn = self.manager.clone();
        let written: bool = conn.set_nx(key, value).await?;
        Ok(written)
    }

    async fn commit_guarded(
        &self,
        guard_key: &str,
        expected: Option<String>,
        writes: &[KvWrite],
    ) -> Result<CommitOutcome, StoreError> {
        // WATCH state lives on the connection, so take a private one.
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(StoreError::from)?;

        redis::cmd("WATCH")
            .arg(guard_key)
            .exec_async(&mut conn)
            .await?;

        // Re-read under the watch: a mismatch means the caller's snapshot
        // is already stale, no point attempting EXEC.
        let current: Option<String> = conn.get(guard_key).await?;
        if current != expected {
            redis::cmd("UNWATCH").exec_async(&mut conn).await?;
            debug!("guard key {} moved before commit", guard_key);
            return Ok(CommitOutcome::Conflict);
        }

        let mut pipe = redis::pipe();
        pipe.atomic();
        for write in writes {
            pipe.set(&write.key, &write.value).ignore();
        }

        // EXEC returns nil when the watched key was touched mid-flight;
        // the driver maps that to None.
        let result: Option<()> = pipe.query_async(&mut conn).await?;
        match result {
            Some(()) => Ok(CommitOutcome::Committed),
            None => {
                debug!("transaction on {} rejected, watch fired", guard_key);
                Ok(CommitOutcome::Conflict)
            }
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.manager.clone();
        conn.ping::<()>().await?;
        Ok(())
    }
}
