#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use linklet::api::handlers::{health_handler, redirect_handler, shorten_handler, stats_handler};
use linklet::application::services::{CounterAllocator, LinkService, StatsService};
use linklet::infrastructure::persistence::KvRecordRepository;
use linklet::infrastructure::store::{InMemoryKvStore, KvStore};
use linklet::state::AppState;

pub const TEST_SEED: u64 = 411757;

/// Builds application state over a fresh in-memory store seeded at `seed`,
/// returning the store handle for direct inspection.
pub async fn create_test_state_with_seed(seed: u64) -> (AppState, Arc<InMemoryKvStore>) {
    let store = Arc::new(InMemoryKvStore::new());
    let kv: Arc<dyn KvStore> = store.clone();

    let allocator = CounterAllocator::new(kv.clone(), seed);
    allocator.ensure_seeded().await.unwrap();

    let records = Arc::new(KvRecordRepository::new(kv.clone()));
    let link_service = Arc::new(LinkService::new(allocator, records.clone()));
    let stats_service = Arc::new(StatsService::new(records));

    let state = AppState::new(
        link_service,
        stats_service,
        kv,
        "http://localhost:3000".to_string(),
    );

    (state, store)
}

pub async fn create_test_state() -> (AppState, Arc<InMemoryKvStore>) {
    create_test_state_with_seed(TEST_SEED).await
}

/// Full application router without the outer path-normalization layer,
/// which test servers don't need.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .route("/api/shorten", post(shorten_handler))
        .route("/api/stats/{code}", get(stats_handler))
        .with_state(state)
}
