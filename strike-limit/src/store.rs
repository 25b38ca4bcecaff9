use std::collections::HashMap;
use std::future::Future;

use parking_lot::RwLock;

use crate::ClientRecord;
use crate::StoreError;

/// Durable key→record mapping keyed by client identifier.
///
/// Implementations must be shareable across tasks (`Send + Sync`). The
/// contract is deliberately small: point reads, whole-record writes and
/// deletes. It does not provide an atomic read-modify-write; callers perform
/// get-then-put and tolerate last-writer-wins interleavings per key.
///
/// A key with no record is reported as `Ok(None)`, distinct from an I/O
/// failure. Deleting a missing key succeeds.
pub trait ClientStore: Send + Sync {
    /// Fetch the record for `id`, or `None` if the client has none.
    fn get(&self, id: &str) -> impl Future<Output = Result<Option<ClientRecord>, StoreError>> + Send;

    /// Persist `record` under `id`, replacing any previous record.
    fn put(&self, id: &str, record: &ClientRecord) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Remove the record for `id`, if any.
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Fetch the record for `id`, treating absence as the zero record.
///
/// The single place where the zero-state default is materialized.
pub(crate) async fn fetch_or_default<S: ClientStore>(
    store: &S,
    id: &str,
) -> Result<ClientRecord, StoreError> {
    Ok(store.get(id).await?.unwrap_or_default())
}

/// In-memory client store.
///
/// Keeps records in a `HashMap` behind a `RwLock`. Useful for tests and for
/// guards that do not need their state to survive a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, ClientRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientStore for MemoryStore {
    async fn get(&self, id: &str) -> Result<Option<ClientRecord>, StoreError> {
        Ok(self.records.read().get(id).cloned())
    }

    async fn put(&self, id: &str, record: &ClientRecord) -> Result<(), StoreError> {
        self.records.write().insert(id.to_owned(), record.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.records.write().remove(id);
        Ok(())
    }
}
