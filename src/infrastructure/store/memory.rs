//! In-memory key-value store implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::kv::{CommitOutcome, KvStore, KvWrite, StoreError};

/// Process-local [`KvStore`] backed by a mutex-guarded map.
///
/// Used by the test suite and as the fallback when no Redis is configured.
/// State does not survive a restart and is not shared between processes;
/// the server logs a warning when running on it.
///
/// The single mutex makes every operation linearizable, so the guarded
/// commit has exactly the semantics the Redis implementation provides via
/// WATCH: the value comparison and the writes happen in one critical
/// section.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().expect("store mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn commit_guarded(
        &self,
        guard_key: &str,
        expected: Option<String>,
        writes: &[KvWrite],
    ) -> Result<CommitOutcome, StoreError> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");

        if entries.get(guard_key) != expected.as_ref() {
            return Ok(CommitOutcome::Conflict);
        }

        for write in writes {
            entries.insert(write.key.clone(), write.value.clone());
        }
        Ok(CommitOutcome::Committed)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
