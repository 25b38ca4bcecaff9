//! # strike-limit
//!
//! `strike-limit` is a per-client attempt-tracking and temporary-lockout guard.
//!
//! Given a client identifier (typically a textual IP address), it records
//! failed attempts; once a configurable threshold is reached, it imposes a
//! timed lockout during which the client is denied regardless of further
//! attempts, until the lockout expires and the client starts clean again.
//!
//! ## Key Concepts
//!
//! * **Stateless evaluation**: every decision re-reads the store; there is no
//!   in-memory cache to invalidate and nothing survives a call.
//! * **Durable by default**: [`Guard::open`] keeps records in an embedded
//!   [redb](https://docs.rs/redb) database, so lockouts survive a restart.
//!   [`MemoryStore`] backs ephemeral guards and tests.
//! * **Three outcomes**: admitted, denied, or errored. A store failure is a
//!   distinct result, never silently mapped to an admit.
//!
//! ## Example
//!
//! ```rust
//! use strike_limit::Guard;
//! use strike_limit::MemoryStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), strike_limit::GuardError> {
//! let guard = Guard::new(MemoryStore::new());
//!
//! guard.record_attempt("203.0.113.7").await?;
//! if guard.check_client("203.0.113.7").await?.is_continue() {
//!     // Request allowed
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

mod error;
mod guard;
mod ledger;
mod lockout;
mod record;
mod redb_store;
mod store;


pub use error::GuardError;
pub use error::StoreError;
pub use guard::DEFAULT_ATTEMPT_THRESHOLD;
pub use guard::DEFAULT_LOCKOUT_DURATION;
pub use guard::Guard;
pub use record::ClientRecord;
pub use redb_store::RedbStore;
pub use store::ClientStore;
pub use store::MemoryStore;

/// Reasons why a client is denied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Denial {
    /// The attempt threshold was reached on this evaluation; a fresh lockout
    /// has been installed and the counter reset.
    ThresholdExceeded {
        /// How long the newly installed lockout lasts.
        retry_after: Duration,
    },
    /// A previously installed lockout is still active.
    LockedOut {
        /// Time remaining until the lockout expires.
        retry_after: Duration,
    },
}

impl Denial {
    /// Time until the client is eligible again.
    pub fn retry_after(&self) -> Duration {
        match self {
            Denial::ThresholdExceeded { retry_after } | Denial::LockedOut { retry_after } => {
                *retry_after
            }
        }
    }
}
