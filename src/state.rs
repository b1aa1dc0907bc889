use std::sync::Arc;

use crate::application::services::{LinkService, StatsService};
use crate::infrastructure::store::KvStore;

/// Shared application state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub stats_service: Arc<StatsService>,
    /// Raw store handle, kept for health checks only; request paths go
    /// through the services.
    pub store: Arc<dyn KvStore>,
    pub public_base_url: String,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        stats_service: Arc<StatsService>,
        store: Arc<dyn KvStore>,
        public_base_url: String,
    ) -> Self {
        Self {
            link_service,
            stats_service,
            store,
            public_base_url,
        }
    }

    /// Constructs the full public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), code)
    }
}
