//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns aggregated statistics for a specific short link.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// # Response
///
/// ```json
/// {
///   "code": "1J7gi4",
///   "long_url": "https://example.com",
///   "created_at": 1700000000,
///   "total_clicks": 2,
///   "hourly_counts": { "1699999200": 2 },
///   "referrer_counts": { "Unknown": 2 },
///   "user_agent_counts": { "Chrome": 1, "Firefox": 0, "Safari": 0, "Opera": 0, "Others": 1 }
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let (record, summary) = state.stats_service.get_stats(&code).await?;

    Ok(Json(StatsResponse {
        code,
        long_url: record.url,
        created_at: record.created_at,
        total_clicks: record.clicks.len(),
        summary,
    }))
}
