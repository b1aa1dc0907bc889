//! Handler for the link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created`:
///
/// ```json
/// {
///   "code": "1J7gi4",
///   "short_url": "http://localhost:3000/1J7gi4",
///   "long_url": "https://example.com"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is malformed or its scheme is not
/// http/https.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let (code, record) = state.link_service.create_short_link(&payload.url).await?;
    let short_url = state.short_url(&code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            code,
            short_url,
            long_url: record.url,
        }),
    ))
}
