//! Lockout manager: the per-client expiring denial timestamp.
//!
//! Expiry arithmetic lives with the caller; these helpers only move the
//! timestamp in and out of the store.

use tracing::trace;

use crate::GuardError;
use crate::store;
use crate::store::ClientStore;

/// Install a lockout on `id` that expires at `expiry_ms` (epoch milliseconds).
///
/// Any attempt counter on the record is preserved.
pub(crate) async fn set_lockout<S: ClientStore>(
    store: &S,
    id: &str,
    expiry_ms: u64,
) -> Result<(), GuardError> {
    let mut record = store::fetch_or_default(store, id).await?;
    record.lockout_expiry = Some(expiry_ms);
    store.put(id, &record).await?;
    trace!(client = id, expiry_ms, "lockout installed");
    Ok(())
}

/// Remove any lockout on `id`, leaving the attempt counter untouched.
///
/// A no-op for clients with no record.
pub(crate) async fn clear_lockout<S: ClientStore>(store: &S, id: &str) -> Result<(), GuardError> {
    let Some(mut record) = store.get(id).await? else {
        return Ok(());
    };

    record.lockout_expiry = None;
    if record.is_clear() {
        store.delete(id).await?;
    } else {
        store.put(id, &record).await?;
    }
    Ok(())
}
