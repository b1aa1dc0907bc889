//! Business logic services orchestrating domain operations.
//!
//! - [`allocator`] - Counter allocation and public code derivation
//! - [`link_service`] - Link creation, lookup, and visit recording
//! - [`stats_service`] - Click history aggregation

pub mod allocator;
pub mod link_service;
pub mod stats_service;

pub use allocator::CounterAllocator;
pub use link_service::LinkService;
pub use stats_service::StatsService;
