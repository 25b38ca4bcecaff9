use std::num::NonZeroU32;
use std::ops::ControlFlow;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::Denial;
use crate::GuardError;
use crate::ledger;
use crate::lockout;
use crate::record::ClientRecord;
use crate::record::now_millis;
use crate::redb_store::RedbStore;
use crate::store::ClientStore;

/// Default maximum number of attempts tolerated before a lockout.
pub const DEFAULT_ATTEMPT_THRESHOLD: NonZeroU32 = NonZeroU32::new(4).unwrap();

/// Default lockout duration: ten minutes.
pub const DEFAULT_LOCKOUT_DURATION: Duration = Duration::from_secs(600);

/// Per-client attempt tracking and timed lockout guard.
///
/// A `Guard` records failed attempts per client identifier (typically a
/// textual IP address) and, once the configured threshold is reached, denies
/// the client for a configured duration. State lives in a [`ClientStore`];
/// every evaluation re-reads the store, so nothing is cached across calls.
///
/// Each guard owns its configuration. Two guards over the same store do not
/// share thresholds or durations, and reconfiguring one affects only its own
/// future evaluations, never already-persisted records.
///
/// ## Concurrency
///
/// Operations on the same identifier are not serialized: concurrent
/// read-modify-write pairs for one key may interleave and the last write
/// wins. That trade-off suits a best-effort guard; distinct identifiers
/// never interfere. Store failures are surfaced immediately and never
/// retried, so an increment is never applied twice by the guard itself.
#[derive(Debug)]
pub struct Guard<S> {
    store: Arc<S>,
    attempt_threshold: NonZeroU32,
    lockout_duration: Duration,
}

impl<S> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            attempt_threshold: self.attempt_threshold,
            lockout_duration: self.lockout_duration,
        }
    }
}

impl Guard<RedbStore> {
    /// Open or create a durable guard whose records live at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GuardError> {
        Ok(Self::new(RedbStore::open(path)?))
    }
}

impl<S: ClientStore> Guard<S> {
    /// Create a guard over `store` with the default threshold (4 attempts)
    /// and lockout duration (10 minutes).
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            attempt_threshold: DEFAULT_ATTEMPT_THRESHOLD,
            lockout_duration: DEFAULT_LOCKOUT_DURATION,
        }
    }

    /// Replace the attempt threshold.
    pub fn with_attempt_threshold(mut self, threshold: NonZeroU32) -> Self {
        self.attempt_threshold = threshold;
        self
    }

    /// Replace the lockout duration.
    pub fn with_lockout_duration(mut self, duration: Duration) -> Self {
        self.lockout_duration = duration;
        self
    }

    /// Change the attempt threshold for future evaluations.
    pub fn set_attempt_threshold(&mut self, threshold: NonZeroU32) {
        self.attempt_threshold = threshold;
    }

    /// Change the lockout duration for future evaluations.
    pub fn set_lockout_duration(&mut self, duration: Duration) {
        self.lockout_duration = duration;
    }

    /// The configured attempt threshold.
    pub fn attempt_threshold(&self) -> NonZeroU32 {
        self.attempt_threshold
    }

    /// The configured lockout duration.
    pub fn lockout_duration(&self) -> Duration {
        self.lockout_duration
    }

    /// Record one failed attempt for `id`.
    ///
    /// No threshold is enforced here; the counter grows until
    /// [`check_client`](Self::check_client) converts it into a lockout.
    pub async fn record_attempt(&self, id: &str) -> Result<(), GuardError> {
        validate_client_id(id)?;
        ledger::record_attempt(self.store.as_ref(), id).await
    }

    /// Clear all recorded attempts for `id`, leaving any lockout in place.
    pub async fn clear_attempts(&self, id: &str) -> Result<(), GuardError> {
        validate_client_id(id)?;
        ledger::clear_attempts(self.store.as_ref(), id).await
    }

    /// Install a lockout on `id`.
    ///
    /// The lockout expires after `duration`, or after the configured default
    /// when `None`. An explicit duration replaces the default; the two are
    /// never combined.
    pub async fn set_lockout(&self, id: &str, duration: Option<Duration>) -> Result<(), GuardError> {
        validate_client_id(id)?;
        let duration = self.effective_duration(duration)?;
        let expiry = now_millis() + duration.as_millis() as u64;
        lockout::set_lockout(self.store.as_ref(), id, expiry).await
    }

    /// Remove any lockout on `id`, leaving the attempt counter untouched.
    pub async fn clear_lockout(&self, id: &str) -> Result<(), GuardError> {
        validate_client_id(id)?;
        lockout::clear_lockout(self.store.as_ref(), id).await
    }

    /// Fetch the stored record for `id`, or `None` if the client has none.
    pub async fn get_client(&self, id: &str) -> Result<Option<ClientRecord>, GuardError> {
        validate_client_id(id)?;
        Ok(self.store.get(id).await?)
    }

    /// Forget `id` entirely: attempts, lockout, everything.
    pub async fn remove_client(&self, id: &str) -> Result<(), GuardError> {
        validate_client_id(id)?;
        Ok(self.store.delete(id).await?)
    }

    /// Decide whether `id` is admitted right now.
    ///
    /// Evaluated fresh on every call:
    ///
    /// 1. No record → `Continue` with no store mutation.
    /// 2. Attempts at or over the threshold → a lockout of the configured
    ///    duration is installed, the counter is reset, and the call returns
    ///    [`Denial::ThresholdExceeded`]. This check wins over an expired
    ///    lockout present on the same record.
    /// 3. An unexpired lockout → [`Denial::LockedOut`], record untouched.
    /// 4. An expired lockout → the client is returned to a clean state and
    ///    admitted.
    /// 5. Otherwise → `Continue`.
    ///
    /// # Errors
    ///
    /// A store failure aborts the evaluation. The result is then neither an
    /// admit nor a deny; callers choose their own safe default.
    pub async fn check_client(&self, id: &str) -> Result<ControlFlow<Denial>, GuardError> {
        validate_client_id(id)?;

        let Some(record) = self.store.get(id).await? else {
            return Ok(ControlFlow::Continue(()));
        };

        if record.attempts() >= self.attempt_threshold.get() {
            let duration = self.effective_duration(None)?;
            let expiry = now_millis() + duration.as_millis() as u64;
            let locked = ClientRecord {
                attempts: None,
                lockout_expiry: Some(expiry),
            };
            self.store.put(id, &locked).await?;
            debug!(client = id, expiry, "attempt threshold reached, lockout installed");
            return Ok(ControlFlow::Break(Denial::ThresholdExceeded {
                retry_after: duration,
            }));
        }

        if let Some(expiry) = record.lockout_expiry {
            let now = now_millis();
            if expiry > now {
                return Ok(ControlFlow::Break(Denial::LockedOut {
                    retry_after: Duration::from_millis(expiry - now),
                }));
            }

            // Expired: clear the lockout and the counter so the client
            // starts clean. The cleared record is the zero record, which is
            // equivalent to no record at all.
            self.store.delete(id).await?;
            debug!(client = id, "lockout expired, client reset");
            return Ok(ControlFlow::Continue(()));
        }

        Ok(ControlFlow::Continue(()))
    }

    fn effective_duration(&self, duration: Option<Duration>) -> Result<Duration, GuardError> {
        let duration = duration.unwrap_or(self.lockout_duration);
        if duration.is_zero() {
            return Err(GuardError::ZeroLockoutDuration);
        }
        Ok(duration)
    }
}

fn validate_client_id(id: &str) -> Result<(), GuardError> {
    if id.is_empty() {
        return Err(GuardError::EmptyClientId);
    }
    Ok(())
}
