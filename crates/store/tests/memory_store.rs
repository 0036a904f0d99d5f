//! Tests for the in-memory progress store.
//!
//! Eviction tests run under a paused Tokio clock so the 30-minute-style
//! delays elapse instantly and deterministically.

use std::time::Duration;

use groupcast_core::progress::{ProgressRecord, STATUS_COMPLETED, STATUS_PROCESSING};
use groupcast_store::{MemoryProgressStore, ProgressStore};
use serde_json::json;

const DELAY: Duration = Duration::from_secs(60);

fn record(status: &str, percentage: u64) -> ProgressRecord {
    ProgressRecord::from_update(
        Some(status),
        Some(&json!(percentage)),
        Some("sending"),
        Some(&json!(10)),
    )
}

// ---------------------------------------------------------------------------
// Test: put/get round-trip
// ---------------------------------------------------------------------------

#[tokio::test]
async fn put_then_get_returns_written_record() {
    let store = MemoryProgressStore::new();
    let written = record(STATUS_PROCESSING, 40);

    store.put("e1", written.clone()).await;

    assert_eq!(store.get("e1").await, Some(written));
}

// ---------------------------------------------------------------------------
// Test: unknown id reads as None
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_unknown_id_returns_none() {
    let store = MemoryProgressStore::new();

    assert_eq!(store.get("nope").await, None);
}

// ---------------------------------------------------------------------------
// Test: last write wins per id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn put_overwrites_prior_record() {
    let store = MemoryProgressStore::new();

    store.put("e1", record(STATUS_PROCESSING, 10)).await;
    store.put("e1", record(STATUS_PROCESSING, 90)).await;

    let current = store.get("e1").await.unwrap();
    assert_eq!(current.percentage, 90);
}

// ---------------------------------------------------------------------------
// Test: completed records are evicted after the delay, not before
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn completed_record_evicted_after_delay() {
    let store = MemoryProgressStore::with_eviction_delay(DELAY);

    store.put("e1", record(STATUS_COMPLETED, 100)).await;

    // Strictly before the delay the record is still readable.
    tokio::time::sleep(DELAY - Duration::from_millis(1)).await;
    assert!(store.get("e1").await.is_some());

    // Past the delay it is gone.
    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(store.get("e1").await, None);
    assert_eq!(store.len().await, 0);
}

// ---------------------------------------------------------------------------
// Test: non-completed records are never evicted
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn processing_record_is_not_evicted() {
    let store = MemoryProgressStore::with_eviction_delay(DELAY);

    store.put("e1", record(STATUS_PROCESSING, 50)).await;

    tokio::time::sleep(DELAY * 10).await;
    assert!(store.get("e1").await.is_some());
}

// ---------------------------------------------------------------------------
// Test: re-writing a completed record restarts the eviction clock
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn rewrite_restarts_eviction_clock() {
    let store = MemoryProgressStore::with_eviction_delay(DELAY);

    store.put("e1", record(STATUS_COMPLETED, 100)).await;

    // Halfway through, the engine re-reports completion.
    tokio::time::sleep(DELAY / 2).await;
    store.put("e1", record(STATUS_COMPLETED, 100)).await;

    // The first timer's deadline passes; the stale timer must not fire.
    tokio::time::sleep(DELAY / 2 + Duration::from_millis(1)).await;
    assert!(store.get("e1").await.is_some());

    // The fresh timer's deadline passes; now the record is evicted.
    tokio::time::sleep(DELAY / 2).await;
    assert_eq!(store.get("e1").await, None);
}

// ---------------------------------------------------------------------------
// Test: a completed-then-overwritten record follows the newest status
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn overwrite_with_processing_disarms_eviction() {
    let store = MemoryProgressStore::with_eviction_delay(DELAY);

    store.put("e1", record(STATUS_COMPLETED, 100)).await;
    store.put("e1", record(STATUS_PROCESSING, 10)).await;

    tokio::time::sleep(DELAY * 2).await;
    let current = store.get("e1").await.unwrap();
    assert_eq!(current.status, STATUS_PROCESSING);
}
