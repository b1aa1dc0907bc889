use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Wire shape of an error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Application-level error taxonomy.
///
/// - [`Validation`](AppError::Validation) - the request is malformed (bad
///   URL scheme, invalid payload); the caller must not retry unchanged.
/// - [`NotFound`](AppError::NotFound) - unknown short code.
/// - [`CorruptRecord`](AppError::CorruptRecord) - a stored value failed to
///   parse; kept distinct from transport failures so operators can tell
///   data damage from outages.
/// - [`StoreUnavailable`](AppError::StoreUnavailable) - the backing store
///   could not be reached. Fatal to the current call; retry policy belongs
///   to the caller.
///
/// Commit conflicts during allocation never surface here: they are consumed
/// by the retry loops that own them.
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    CorruptRecord { message: String, details: Value },
    StoreUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn corrupt_record(message: impl Into<String>, details: Value) -> Self {
        Self::CorruptRecord {
            message: message.into(),
            details,
        }
    }
    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::CorruptRecord { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "corrupt_record",
                message,
                details,
            ),
            AppError::StoreUnavailable { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "store_unavailable",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&errors).unwrap_or_else(|_| json!({})),
        )
    }
}

impl From<crate::infrastructure::store::StoreError> for AppError {
    fn from(error: crate::infrastructure::store::StoreError) -> Self {
        AppError::store_unavailable("Store unavailable", json!({ "reason": error.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                AppError::bad_request("bad", json!({})).into_response(),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::not_found("missing", json!({})).into_response(),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::corrupt_record("broken", json!({})).into_response(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::store_unavailable("down", json!({})).into_response(),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (response, expected) in cases {
            assert_eq!(response.status(), expected);
        }
    }
}
