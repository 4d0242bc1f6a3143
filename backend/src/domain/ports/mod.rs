//! Driven ports the workflow services call through.
//!
//! Adapters live under `outbound`; tests substitute mocks or the in-memory
//! record store.

pub mod notifier;
pub mod record_store;

pub use self::notifier::LeaderboardNotifier;
pub use self::record_store::{Condition, Filter, RecordStore, StoreError, decode_row, decode_rows};

#[cfg(test)]
pub use self::notifier::{MockLeaderboardNotifier, NoopNotifier};
#[cfg(test)]
pub use self::record_store::MockRecordStore;
