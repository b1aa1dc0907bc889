//! Link creation and resolution service.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::application::services::allocator::CounterAllocator;
use crate::domain::entities::{Click, Record};
use crate::domain::repositories::RecordRepository;
use crate::error::AppError;
use crate::utils::url_validator::validate_url;

/// Service for creating short links and resolving visits.
///
/// Creation goes through the counter allocator, so every issued code is
/// backed by a counter value allocated exactly once; resolution appends
/// the visit's click before handing back the destination URL.
pub struct LinkService {
    allocator: CounterAllocator,
    records: Arc<dyn RecordRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(allocator: CounterAllocator, records: Arc<dyn RecordRepository>) -> Self {
        Self { allocator, records }
    }

    /// Creates a short link for `url` and returns the issued code with its
    /// fresh record.
    ///
    /// The URL is stored exactly as submitted; only the scheme is policed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] unless the URL parses with an
    /// http/https scheme. Allocation errors propagate (see
    /// [`CounterAllocator::allocate`]).
    pub async fn create_short_link(&self, url: &str) -> Result<(String, Record), AppError> {
        validate_url(url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        let (code, record) = self.allocator.allocate(url).await?;
        info!("created short link {} -> {}", code, record.url);
        Ok((code, record))
    }

    /// Retrieves the record stored under a code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code was never issued.
    pub async fn get_record(&self, code: &str) -> Result<Record, AppError> {
        self.records.get(code).await?.ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "code": code }))
        })
    }

    /// Records a visit and returns the destination URL.
    ///
    /// The click is appended durably before the URL is returned, so a
    /// redirect the caller observes is always preceded by its telemetry.
    /// The timestamp is captured here, server-side.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code was never issued.
    pub async fn resolve_and_record(
        &self,
        code: &str,
        user_agent: Option<&str>,
        referrer: Option<&str>,
    ) -> Result<String, AppError> {
        let click = Click::now(user_agent, referrer);
        let record = self.records.append_click(code, click).await?;
        Ok(record.url)
    }
}
