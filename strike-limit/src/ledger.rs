//! Attempt ledger: the per-client failed-attempt counter.
//!
//! Increments never enforce the threshold; that is the decision engine's job.

use tracing::trace;

use crate::GuardError;
use crate::store;
use crate::store::ClientStore;

/// Record one failed attempt for `id`.
///
/// Absent records count from zero.
pub(crate) async fn record_attempt<S: ClientStore>(store: &S, id: &str) -> Result<(), GuardError> {
    let mut record = store::fetch_or_default(store, id).await?;
    record.attempts = Some(record.attempts().saturating_add(1));
    store.put(id, &record).await?;
    trace!(client = id, attempts = record.attempts(), "recorded attempt");
    Ok(())
}

/// Clear all attempts for `id`, leaving any lockout untouched.
///
/// A no-op for clients with no record.
pub(crate) async fn clear_attempts<S: ClientStore>(store: &S, id: &str) -> Result<(), GuardError> {
    let Some(mut record) = store.get(id).await? else {
        return Ok(());
    };

    record.attempts = None;
    if record.is_clear() {
        store.delete(id).await?;
    } else {
        store.put(id, &record).await?;
    }
    Ok(())
}
