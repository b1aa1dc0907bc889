//! DTOs for link statistics.

use serde::Serialize;

use crate::domain::analytics::Summary;

/// Aggregated statistics for a specific short link.
///
/// The summary maps are flattened into the top level of the payload.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub code: String,
    pub long_url: String,
    pub created_at: i64,
    pub total_clicks: usize,
    #[serde(flatten)]
    pub summary: Summary,
}
