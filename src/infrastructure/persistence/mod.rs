//! Repository implementations over the key-value store.

pub mod kv_record_repository;

pub use kv_record_repository::KvRecordRepository;
