//! # linklet
//!
//! A counter-based URL shortening service built with Axum and Redis.
//!
//! Every short code is derived deterministically from a single shared
//! counter: the counter is advanced and the link record written in one
//! optimistic transaction, so codes are collision-free by construction.
//! A checksum suffix makes them typo-resistant, and every visit is
//! recorded for hourly/referrer/browser-family statistics.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, repository traits, and click
//!   aggregation
//! - **Application Layer** ([`application`]) - Counter allocation and service
//!   orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Key-value store backends
//!   and record persistence
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional; omitting it runs on a non-persistent in-memory store
//! export REDIS_URL="redis://localhost:6379"
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CounterAllocator, LinkService, StatsService};
    pub use crate::domain::analytics::{Summary, UaFamily, summarize};
    pub use crate::domain::entities::{Click, Record};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
