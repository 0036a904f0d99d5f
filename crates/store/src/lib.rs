//! Progress store: last-known status per execution id.
//!
//! The store is the only shared mutable state in the system. It is kept
//! behind the [`ProgressStore`] trait so the HTTP layer depends only on
//! the `put`/`get` contract; a multi-instance deployment can swap the
//! in-memory backing for a shared key-value service without touching the
//! handlers.

pub mod memory;

use async_trait::async_trait;
use groupcast_core::progress::ProgressRecord;

pub use memory::MemoryProgressStore;

/// Keyed snapshot storage with last-write-wins semantics per execution id.
///
/// Implementations must evict a record some fixed delay after a write
/// with `status == "completed"`; records that never complete are retained
/// for the life of the store (accepted limitation, see `DESIGN.md`).
/// Operations never fail: field coercion happens before `put`, and
/// reading an unknown id is simply `None`.
#[async_trait]
pub trait ProgressStore: Send + Sync + 'static {
    /// Write the record for an execution id, overwriting any prior one.
    async fn put(&self, execution_id: &str, record: ProgressRecord);

    /// Read the current record for an execution id, if any.
    async fn get(&self, execution_id: &str) -> Option<ProgressRecord>;
}
