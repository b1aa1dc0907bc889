//! Click statistics service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::analytics::{self, Summary};
use crate::domain::entities::Record;
use crate::domain::repositories::RecordRepository;
use crate::error::AppError;

/// Service for retrieving a link's aggregated click statistics.
///
/// Fetching and aggregation are separate concerns: the repository reads
/// the record, [`analytics::summarize`] folds its click history. This
/// service only connects the two.
pub struct StatsService {
    records: Arc<dyn RecordRepository>,
}

impl StatsService {
    /// Creates a new statistics service.
    pub fn new(records: Arc<dyn RecordRepository>) -> Self {
        Self { records }
    }

    /// Retrieves the record for `code` together with its summary.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code was never issued.
    pub async fn get_stats(&self, code: &str) -> Result<(Record, Summary), AppError> {
        let record = self.records.get(code).await?.ok_or_else(|| {
            AppError::not_found("Statistics not found", json!({ "code": code }))
        })?;

        let summary = analytics::summarize(&record);
        Ok((record, summary))
    }
}
