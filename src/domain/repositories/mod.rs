//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for testing.

pub mod record_repository;

pub use record_repository::RecordRepository;

#[cfg(test)]
pub use record_repository::MockRecordRepository;
