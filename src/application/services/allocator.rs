//! Counter allocation: the one place short codes come from.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use crate::domain::entities::Record;
use crate::error::AppError;
use crate::infrastructure::store::{CommitOutcome, KvStore, KvWrite};
use crate::utils::{base62, checksum::checksum};

/// Store key holding the shared counter, as a decimal string.
pub const COUNTER_KEY: &str = "max_id";

/// Value the counter is seeded with on first startup.
pub const DEFAULT_COUNTER_SEED: u64 = 411757;

/// Checksum suffix parameters for issued codes.
const CHECKSUM_LENGTH: u32 = 2;
const CHECKSUM_MODULUS: u64 = 62;

/// Derives the public code for a counter value:
/// base-62 encoding plus checksum suffix.
///
/// Deterministic, so distinct counter values yield distinct codes (the
/// encoding alone is injective; the suffix only adds typo resistance).
pub fn public_code(value: u64) -> String {
    format!(
        "{}{}",
        base62::encode(value),
        checksum(value, CHECKSUM_LENGTH, CHECKSUM_MODULUS)
    )
}

/// Hands out strictly increasing counter values, one per call, safe under
/// concurrent callers, and persists each value's record in the same
/// atomic commit.
///
/// # Algorithm
///
/// Optimistic concurrency with unbounded retry: read the counter, build
/// the candidate code and record from `current + 1`, then ask the store to
/// commit both writes guarded on the counter key being untouched since the
/// read. A rejected commit is not an error; it means another caller won
/// the value, so all candidate state is discarded and the sequence
/// restarts from a fresh read. Conflicts only ever come from other
/// allocations of this one key, so the loop is expected to converge
/// quickly.
///
/// # Guarantees
///
/// - No two callers ever commit the same counter value.
/// - The counter advance and the record become visible together: there is
///   no window where one exists without the other.
///
/// A store transport failure is fatal to the call and propagates; only
/// commit conflicts are retried.
pub struct CounterAllocator {
    store: Arc<dyn KvStore>,
    seed: u64,
}

impl CounterAllocator {
    pub fn new(store: Arc<dyn KvStore>, seed: u64) -> Self {
        Self { store, seed }
    }

    /// Seeds the counter if it does not exist yet. Atomic set-if-absent,
    /// so concurrent startups cannot double-seed or reset it.
    pub async fn ensure_seeded(&self) -> Result<(), AppError> {
        let written = self
            .store
            .set_if_absent(COUNTER_KEY, &self.seed.to_string())
            .await?;

        if written {
            info!("Counter seeded at {}", self.seed);
        }
        Ok(())
    }

    /// Allocates the next counter value and stores `url`'s record under
    /// the derived code, as one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CorruptRecord`] if the counter key is missing
    /// or unparsable (allocation never invents counter state), and
    /// [`AppError::StoreUnavailable`] on transport errors.
    pub async fn allocate(&self, url: &str) -> Result<(String, Record), AppError> {
        loop {
            let raw = self.store.get(COUNTER_KEY).await?.ok_or_else(|| {
                AppError::corrupt_record(
                    "Counter key is missing",
                    json!({ "key": COUNTER_KEY }),
                )
            })?;

            let current: u64 = raw.parse().map_err(|_| {
                AppError::corrupt_record(
                    "Counter value is not a non-negative integer",
                    json!({ "key": COUNTER_KEY, "value": raw.clone() }),
                )
            })?;

            let next = current + 1;
            let code = public_code(next);
            let record = Record::new(url);
            let serialized = serde_json::to_string(&record).map_err(|e| {
                AppError::corrupt_record(
                    "Failed to serialize record",
                    json!({ "reason": e.to_string() }),
                )
            })?;

            let writes = [
                KvWrite::new(COUNTER_KEY, next.to_string()),
                KvWrite::new(code.as_str(), serialized),
            ];

            match self
                .store
                .commit_guarded(COUNTER_KEY, Some(raw), &writes)
                .await?
            {
                CommitOutcome::Committed => {
                    debug!("allocated counter value {} as code {}", next, code);
                    return Ok((code, record));
                }
                CommitOutcome::Conflict => {
                    // Another caller took this value; discard everything
                    // and start over from a fresh read.
                    debug!("allocation conflict at {}, retrying", next);
                    continue;
                }
            }
        }
    }
}
