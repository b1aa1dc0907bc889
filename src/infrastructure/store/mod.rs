//! Key-value store abstractions (Redis and in-memory implementations).

pub mod kv;
pub mod memory;
pub mod redis_store;

pub use kv::{CommitOutcome, KvStore, KvWrite, StoreError};
pub use memory::InMemoryKvStore;
pub use redis_store::RedisKvStore;

#[cfg(test)]
pub use kv::MockKvStore;
