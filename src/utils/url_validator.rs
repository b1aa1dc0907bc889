//! Destination URL validation.
//!
//! Link creation accepts http/https destinations only. The URL is stored
//! exactly as submitted; validation never rewrites it, so the stats view
//! always reports the string the caller shortened.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Validates a destination URL without altering it.
///
/// # Rules
///
/// 1. The string must parse as an absolute URL
/// 2. The scheme must be `http` or `https`
///
/// Rejecting other schemes keeps `javascript:`, `data:`, `file:` and
/// similar destinations out of redirects.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed URLs.
/// Returns [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    let url =
        Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(UrlValidationError::UnsupportedProtocol),
    }
}
