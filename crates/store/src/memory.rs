//! In-memory progress store.
//!
//! A `RwLock<HashMap>` keyed by execution id, designed to be wrapped in
//! `Arc` and shared across handlers. Valid for the lifetime of one server
//! process only; push and pull must land on the same instance.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use groupcast_core::progress::ProgressRecord;
use tokio::sync::RwLock;

use crate::ProgressStore;

/// How long a `completed` record stays readable before eviction.
pub const DEFAULT_EVICTION_DELAY: Duration = Duration::from_secs(30 * 60);

/// A stored record tagged with the generation of the write that produced
/// it. Eviction timers carry the generation they were scheduled for, so a
/// stale timer never removes a record written after it was scheduled.
struct Entry {
    record: ProgressRecord,
    generation: u64,
}

pub struct MemoryProgressStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    eviction_delay: Duration,
    generations: AtomicU64,
}

impl MemoryProgressStore {
    /// Create a store with the default 30-minute eviction delay.
    pub fn new() -> Self {
        Self::with_eviction_delay(DEFAULT_EVICTION_DELAY)
    }

    /// Create a store with a custom eviction delay.
    pub fn with_eviction_delay(eviction_delay: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            eviction_delay,
            generations: AtomicU64::new(0),
        }
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for MemoryProgressStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressStore for MemoryProgressStore {
    async fn put(&self, execution_id: &str, record: ProgressRecord) {
        let generation = self.generations.fetch_add(1, Ordering::Relaxed);
        let schedule_eviction = record.is_completed();

        self.entries
            .write()
            .await
            .insert(execution_id.to_string(), Entry { record, generation });

        // The eviction clock starts at the completed write, not at the
        // creation of the execution. A later re-write bumps the entry's
        // generation, which disarms this timer.
        if schedule_eviction {
            let entries = Arc::clone(&self.entries);
            let execution_id = execution_id.to_string();
            let delay = self.eviction_delay;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let mut map = entries.write().await;
                if map
                    .get(&execution_id)
                    .is_some_and(|entry| entry.generation == generation)
                {
                    map.remove(&execution_id);
                    tracing::debug!(%execution_id, "Evicted completed progress record");
                }
            });
        }
    }

    async fn get(&self, execution_id: &str) -> Option<ProgressRecord> {
        self.entries
            .read()
            .await
            .get(execution_id)
            .map(|entry| entry.record.clone())
    }
}
