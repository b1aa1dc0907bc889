//! Repository trait for link record data access.

use crate::domain::entities::{Click, Record};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for reading and mutating link records.
///
/// Record *creation* is deliberately absent: a record only comes into
/// existence inside the counter allocator's atomic commit, never through
/// an independent write path.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::KvRecordRepository`] - key-value
///   store implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Finds the record stored under a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Record))` if found
    /// - `Ok(None)` if the code was never issued
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CorruptRecord`] if the stored value fails to
    /// parse, and [`AppError::StoreUnavailable`] on transport errors.
    async fn get(&self, code: &str) -> Result<Option<Record>, AppError>;

    /// Appends one click to a record's history and returns the updated
    /// record.
    ///
    /// The append is atomic: concurrent appends to the same code all land,
    /// none overwrites another. (The original design allowed a lost-update
    /// race here; this contract deliberately strengthens it to a guarded
    /// read-modify-write with retry.)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes,
    /// [`AppError::CorruptRecord`] for unparsable stored values, and
    /// [`AppError::StoreUnavailable`] on transport errors.
    async fn append_click(&self, code: &str, click: Click) -> Result<Record, AppError>;
}
