//! Key-value store trait and error types.
//!
//! The whole persistence surface of the service is four primitives: read,
//! write, atomic set-if-absent, and a guarded multi-key commit. The guarded
//! commit is the optimistic-concurrency building block: it applies a batch
//! of writes only if a designated guard key is unchanged since the caller
//! read it, and reports a conflict (not an error) otherwise.

use async_trait::async_trait;

/// Errors that can occur during store operations.
///
/// Transport failures are fatal to the call that hit them; the core never
/// retries them. Commit conflicts are NOT errors; they come back as
/// [`CommitOutcome::Conflict`] and belong to the caller's retry loop.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store operation error: {0}")]
    Operation(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(error: redis::RedisError) -> Self {
        if error.is_connection_refusal() || error.is_io_error() || error.is_timeout() {
            StoreError::Connection(error.to_string())
        } else {
            StoreError::Operation(error.to_string())
        }
    }
}

/// Result of a guarded commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// All writes were applied atomically.
    Committed,
    /// The guard key changed since it was read; nothing was written.
    Conflict,
}

/// One write inside a guarded commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvWrite {
    pub key: String,
    pub value: String,
}

impl KvWrite {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Trait for the shared key-value store backing counters and records.
///
/// Implementations must be thread-safe; every method may be called from
/// concurrent request handlers.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisKvStore`] - Redis, WATCH-based
///   guarded commits
/// - [`crate::infrastructure::store::InMemoryKvStore`] - process-local map
///   for tests and storeless development runs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` if present
    /// - `Ok(None)` if absent
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Unconditionally stores `value` under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Stores `value` under `key` only if the key is absent, atomically.
    ///
    /// Returns `true` if the write happened, `false` if the key already
    /// existed. Used for one-time counter seeding.
    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool, StoreError>;

    /// Applies `writes` as one atomic batch, but only if `guard_key` still
    /// holds `expected` at commit time.
    ///
    /// The comparison covers the whole window back to the caller's read:
    /// implementations watch `guard_key` before re-reading it, so a
    /// concurrent modification between the caller's `get` and the commit is
    /// detected either by the value comparison or by the watch.
    ///
    /// A conflict applies none of the writes. Conflicts are expected under
    /// contention and are reported in the `Ok` path so callers can retry
    /// without error plumbing.
    async fn commit_guarded(
        &self,
        guard_key: &str,
        expected: Option<String>,
        writes: &[KvWrite],
    ) -> Result<CommitOutcome, StoreError>;

    /// Checks that the store backend is reachable.
    ///
    /// Used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
