//! HTTP server initialization and runtime setup.
//!
//! Handles store connection, counter seeding, and Axum server lifecycle.

use crate::application::services::{CounterAllocator, LinkService, StatsService};
use crate::config::Config;
use crate::infrastructure::persistence::KvRecordRepository;
use crate::infrastructure::store::{InMemoryKvStore, KvStore, RedisKvStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The key-value store (Redis, or in-memory when none is configured)
/// - One-time counter seeding
/// - Axum HTTP server
///
/// A configured-but-unreachable Redis is fatal: falling back silently
/// would strand previously issued codes in the unreachable store.
///
/// # Errors
///
/// Returns an error if:
/// - Redis is configured and the connection fails
/// - Counter seeding fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store: Arc<dyn KvStore> = if let Some(redis_url) = &config.redis_url {
        let redis = RedisKvStore::connect(redis_url)
            .await
            .context("Failed to connect to the configured Redis store")?;
        Arc::new(redis)
    } else {
        tracing::warn!("No Redis configured; using in-memory store (state is lost on restart)");
        Arc::new(InMemoryKvStore::new())
    };

    let allocator = CounterAllocator::new(store.clone(), config.counter_seed);
    allocator
        .ensure_seeded()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to seed counter: {:?}", e))?;

    let records = Arc::new(KvRecordRepository::new(store.clone()));
    let link_service = Arc::new(LinkService::new(allocator, records.clone()));
    let stats_service = Arc::new(StatsService::new(records));

    let state = AppState::new(
        link_service,
        stats_service,
        store,
        config.public_base_url.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
