/// Errors from client store backends.
///
/// A missing key is never an error; lookups report absence as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing database failed to read, write, or commit.
    #[error("database error: {0}")]
    Backend(String),

    /// A stored record could not be encoded or decoded.
    #[error("codec error for key {key}: {source}")]
    Codec {
        /// The client identifier whose record was malformed.
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The blocking storage task was cancelled or panicked.
    #[error("storage task failed: {0}")]
    Task(String),
}

impl From<redb::DatabaseError> for StoreError {
    fn from(err: redb::DatabaseError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(err: redb::TransactionError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<redb::TableError> for StoreError {
    fn from(err: redb::TableError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(err: redb::StorageError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(err: redb::CommitError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::Task(err.to_string())
    }
}

/// Errors produced by guard operations.
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// The underlying store failed.
    ///
    /// An aborted evaluation is neither an admit nor a deny; callers must
    /// treat it as a distinct third outcome rather than defaulting to admit.
    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    /// Client identifiers must be non-empty strings.
    #[error("client identifier is empty")]
    EmptyClientId,

    /// Lockout durations must be non-zero.
    #[error("lockout duration is zero")]
    ZeroLockoutDuration,
}
