//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL, recording the visit.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Extract `User-Agent` and `Referer` headers (both optional)
/// 2. Append a server-timestamped click to the record
/// 3. Return 307 Temporary Redirect to the destination
///
/// The click append completes before the redirect is produced, so every
/// observed redirect has its telemetry on disk.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    let referrer = headers.get(header::REFERER).and_then(|v| v.to_str().ok());

    let url = state
        .link_service
        .resolve_and_record(&code, user_agent, referrer)
        .await?;

    Ok(Redirect::temporary(&url))
}
