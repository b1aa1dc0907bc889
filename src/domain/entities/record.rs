//! Link record and click entities with their persisted wire format.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The persisted entry for one short code.
///
/// Stored as a JSON object under the code itself. The wire format keeps the
/// historical field names (`traffic`, `time`) so records written by earlier
/// deployments keep decoding; the Rust-side names describe what the fields
/// hold.
///
/// A record is created exactly once, atomically with the counter advance
/// that produced its code, and is mutated only by click appends afterwards.
/// The click sequence is append-only: insertion order is arrival order, and
/// entries are never reordered or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Destination URL, exactly as submitted at creation.
    pub url: String,

    /// Ordered click history, oldest first.
    #[serde(rename = "traffic")]
    pub clicks: Vec<Click>,

    /// Creation time, seconds since epoch (UTC).
    #[serde(rename = "time")]
    pub created_at: i64,
}

impl Record {
    /// Creates a fresh record for `url` with an empty click history,
    /// stamped with the current server time.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            clicks: Vec::new(),
            created_at: Utc::now().timestamp(),
        }
    }
}

/// One recorded visit.
///
/// All client metadata is optional: headers may be missing, and absent
/// values serialize as `null`. The timestamp is captured at the server when
/// the redirect happens, never taken from the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Click {
    /// Raw `User-Agent` header. Persisted under the historical name `UA`.
    #[serde(rename = "UA")]
    pub user_agent: Option<String>,

    /// Visit time, seconds since epoch (UTC), server-captured.
    pub timestamp: i64,

    /// Raw `Referer` header.
    pub referrer: Option<String>,
}

impl Click {
    /// Creates a click stamped with the current server time.
    pub fn now(user_agent: Option<&str>, referrer: Option<&str>) -> Self {
        Self {
            user_agent: user_agent.map(str::to_string),
            timestamp: Utc::now().timestamp(),
            referrer: referrer.map(str::to_string),
        }
    }
}
