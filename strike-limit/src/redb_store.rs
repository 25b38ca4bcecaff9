use std::path::Path;
use std::sync::Arc;

use redb::Database;
use redb::TableDefinition;
use tokio::task;
use tracing::debug;

use crate::ClientRecord;
use crate::StoreError;
use crate::store::ClientStore;

/// Table definition for client records.
/// Key: client identifier string
/// Value: serde_json-encoded [`ClientRecord`]
const CLIENTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("clients");

/// Durable client store backed by the redb embedded database.
///
/// Each operation runs its transaction on the tokio blocking pool, so async
/// callers suspend for the duration of the I/O instead of pinning a worker
/// thread. The database handle is shared, making clones of this store cheap.
#[derive(Clone, Debug)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a client store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = Database::create(path)?;

        // Ensure the clients table exists before the first read.
        let txn = db.begin_write()?;
        {
            let _ = txn.open_table(CLIENTS_TABLE)?;
        }
        txn.commit()?;

        debug!("opened redb client store");
        Ok(Self { db: Arc::new(db) })
    }
}

fn decode(key: &str, bytes: &[u8]) -> Result<ClientRecord, StoreError> {
    serde_json::from_slice(bytes).map_err(|source| StoreError::Codec {
        key: key.to_owned(),
        source,
    })
}

fn encode(key: &str, record: &ClientRecord) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(record).map_err(|source| StoreError::Codec {
        key: key.to_owned(),
        source,
    })
}

impl ClientStore for RedbStore {
    async fn get(&self, id: &str) -> Result<Option<ClientRecord>, StoreError> {
        let db = Arc::clone(&self.db);
        let key = id.to_owned();

        task::spawn_blocking(move || -> Result<Option<ClientRecord>, StoreError> {
            let txn = db.begin_read()?;
            let table = txn.open_table(CLIENTS_TABLE)?;
            match table.get(key.as_str())? {
                Some(value) => Ok(Some(decode(&key, value.value())?)),
                None => Ok(None),
            }
        })
        .await?
    }

    async fn put(&self, id: &str, record: &ClientRecord) -> Result<(), StoreError> {
        let db = Arc::clone(&self.db);
        let key = id.to_owned();
        let bytes = encode(&key, record)?;

        task::spawn_blocking(move || -> Result<(), StoreError> {
            let txn = db.begin_write()?;
            {
                let mut table = txn.open_table(CLIENTS_TABLE)?;
                table.insert(key.as_str(), bytes.as_slice())?;
            }
            txn.commit()?;
            Ok(())
        })
        .await?
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let db = Arc::clone(&self.db);
        let key = id.to_owned();

        task::spawn_blocking(move || -> Result<(), StoreError> {
            let txn = db.begin_write()?;
            {
                let mut table = txn.open_table(CLIENTS_TABLE)?;
                table.remove(key.as_str())?;
            }
            txn.commit()?;
            Ok(())
        })
        .await?
    }
}
