//! Key-value store implementation of the record repository.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::{Click, Record};
use crate::domain::repositories::RecordRepository;
use crate::error::AppError;
use crate::infrastructure::store::{CommitOutcome, KvStore, KvWrite};

/// [`RecordRepository`] backed by the shared key-value store.
///
/// Records live as JSON under their code. Parsing happens here, at the
/// store boundary: a value that fails to decode is reported as
/// [`AppError::CorruptRecord`] instead of leaking an untyped parse failure
/// upward.
pub struct KvRecordRepository {
    store: Arc<dyn KvStore>,
}

impl KvRecordRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Fetches the raw stored value for a code along with its decoded form.
    ///
    /// The raw string is what the click append uses as its commit guard:
    /// the store compares it byte-for-byte at commit time.
    async fn fetch_raw(&self, code: &str) -> Result<Option<(String, Record)>, AppError> {
        let Some(raw) = self.store.get(code).await? else {
            return Ok(None);
        };

        let record = parse_record(code, &raw)?;
        Ok(Some((raw, record)))
    }
}

#[async_trait]
impl RecordRepository for KvRecordRepository {
    async fn get(&self, code: &str) -> Result<Option<Record>, AppError> {
        Ok(self.fetch_raw(code).await?.map(|(_, record)| record))
    }

    async fn append_click(&self, code: &str, click: Click) -> Result<Record, AppError> {
        // Guarded read-modify-write, same shape as the counter commit:
        // watch the record key, rebuild the candidate, commit only if the
        // stored bytes are unchanged. A conflict means another visit landed
        // first; re-read and try again so no click is lost.
        loop {
            let (raw, mut record) = self.fetch_raw(code).await?.ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "code": code }))
            })?;

            record.clicks.push(click.clone());

            let serialized = serde_json::to_string(&record).map_err(|e| {
                AppError::corrupt_record(
                    "Failed to serialize record",
                    json!({ "code": code, "reason": e.to_string() }),
                )
            })?;

            match self
                .store
                .commit_guarded(code, Some(raw), &[KvWrite::new(code, serialized)])
                .await?
            {
                CommitOutcome::Committed => return Ok(record),
                CommitOutcome::Conflict => {
                    debug!("concurrent click on {}, retrying append", code);
                    continue;
                }
            }
        }
    }
}

/// Decodes a stored record, mapping parse failures to `CorruptRecord`.
fn parse_record(code: &str, raw: &str) -> Result<Record, AppError> {
    serde_json::from_str(raw).map_err(|e| {
        warn!("corrupt record under code {}: {}", code, e);
        AppError::corrupt_record(
            "Stored record failed to parse",
            json!({ "code": code, "reason": e.to_string() }),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::InMemoryKvStore;

    fn repository_with_store() -> (KvRecordRepository, Arc<InMemoryKvStore>) {
        let store = Arc::new(InMemoryKvStore::new());
        (KvRecordRepository::new(store.clone()), store)
    }

    fn sample_record() -> Record {
        Record {
            url: "https://example.com".to_string(),
            clicks: vec![],
            created_at: 1_700_000_000,
        }
    }

    #[tokio::test]
    async fn test_get_unknown_code() {
        let (repository, _store) = repository_with_store();
        assert!(repository.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_round_trips_stored_record() {
        let (repository, store) = repository_with_store();
        let record = sample_record();
        store
            .set("abc", &serde_json::to_string(&record).unwrap())
            .await
            .unwrap();

        let fetched = repository.get("abc").await.unwrap().unwrap();
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn test_get_corrupt_value() {
        let (repository, store) = repository_with_store();
        store.set("abc", "{not json").await.unwrap();

        let error = repository.get("abc").await.unwrap_err();
        assert!(matches!(error, AppError::CorruptRecord { .. }));
    }

    #[tokio::test]
    async fn test_append_click_unknown_code() {
        let (repository, _store) = repository_with_store();

        let error = repository
            .append_click("missing", Click::now(None, None))
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_append_click_preserves_order() {
        let (repository, store) = repository_with_store();
        store
            .set("abc", &serde_json::to_string(&sample_record()).unwrap())
            .await
            .unwrap();

        let first = Click {
            user_agent: Some("Firefox/121".to_string()),
            timestamp: 100,
            referrer: None,
        };
        let second = Click {
            user_agent: Some("Chrome/120".to_string()),
            timestamp: 200,
            referrer: None,
        };

        repository.append_click("abc", first.clone()).await.unwrap();
        let updated = repository.append_click("abc", second.clone()).await.unwrap();

        assert_eq!(updated.clicks, vec![first, second]);
    }

    #[tokio::test]
    async fn test_concurrent_appends_all_land() {
        let (repository, store) = repository_with_store();
        store
            .set("abc", &serde_json::to_string(&sample_record()).unwrap())
            .await
            .unwrap();

        let repository = Arc::new(repository);
        let mut handles = Vec::new();
        for i in 0..16_i64 {
            let repository = repository.clone();
            handles.push(tokio::spawn(async move {
                repository
                    .append_click(
                        "abc",
                        Click {
                            user_agent: None,
                            timestamp: i,
                            referrer: None,
                        },
                    )
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let record = repository.get("abc").await.unwrap().unwrap();
        assert_eq!(record.clicks.len(), 16);
    }
}
