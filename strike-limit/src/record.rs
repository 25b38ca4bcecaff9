use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;

/// State tracked for a single client identifier.
///
/// The persisted encoding is JSON with the field names `attempts` and
/// `lockoutExpiry`; absent counters and expiries serialize as `null`. This
/// schema is the externally observable on-disk format and is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Failed attempts recorded since the last reset.
    #[serde(default)]
    pub attempts: Option<u32>,
    /// Epoch-millisecond instant after which the lockout no longer applies.
    ///
    /// Never a standing fact: compare against the clock at every read.
    #[serde(default, rename = "lockoutExpiry")]
    pub lockout_expiry: Option<u64>,
}

impl ClientRecord {
    /// The attempt count, treating an absent counter as zero.
    pub fn attempts(&self) -> u32 {
        self.attempts.unwrap_or(0)
    }

    /// True when this record carries no state at all.
    ///
    /// A clear record is equivalent to an absent one and need not be stored.
    pub fn is_clear(&self) -> bool {
        self.attempts() == 0 && self.lockout_expiry.is_none()
    }

    /// True when a lockout is set and has not yet expired at `now_ms`.
    pub fn lockout_active(&self, now_ms: u64) -> bool {
        self.lockout_expiry.is_some_and(|expiry| expiry > now_ms)
    }
}

/// Current wall-clock time in epoch milliseconds.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
