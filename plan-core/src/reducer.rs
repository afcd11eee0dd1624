//! The `worker_results` reducer contract (spec.md §4.1, §5, §9).
//!
//! spec.md describes `worker_results` as a field whose merge function is
//! "sequence-append with empty-as-reset": parallel branches contribute
//! results without clobbering each other, and Join/Reduce drains the
//! accumulator back to empty once it has consumed a round's results.
//!
//! spec.md §9 offers two valid implementation shapes for this: "a
//! channel-backed accumulator drained by Join/Reduce, or a mutex-guarded
//! slice." This crate picks the mutex-guarded slice, the same shape
//! `neuron-state-memory::MemoryStore` uses (`tokio::sync::RwLock` around a
//! `HashMap`) for its single piece of shared mutable state.

use crate::model::WorkerResult;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Pure merge function: the sole mechanism by which parallel worker tasks
/// contribute results without clobbering each other (spec.md §4.1).
///
/// If `update` is empty, returns an empty vec (the "drain" case used by
/// Join/Reduce). Otherwise returns `existing` followed by `update`.
pub fn merge_worker_results(
    existing: Vec<WorkerResult>,
    update: Vec<WorkerResult>,
) -> Vec<WorkerResult> {
    if update.is_empty() {
        return Vec::new();
    }
    let mut merged = existing;
    merged.extend(update);
    merged
}

/// Mutex-guarded accumulator for `worker_results`, shared across the
/// concurrent worker tasks dispatched within a single round.
///
/// Each parallel worker task calls [`WorkerResultsSink::push`] independently
/// when it completes; Join/Reduce calls [`WorkerResultsSink::drain`] once,
/// after all tasks for the round have been awaited, to atomically read and
/// reset the accumulator. This is the rendezvous point spec.md §9 calls
/// "the barrier's rendezvous."
#[derive(Clone, Default)]
pub struct WorkerResultsSink {
    inner: Arc<Mutex<Vec<WorkerResult>>>,
}

impl WorkerResultsSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one result. Safe to call concurrently from multiple tasks.
    pub async fn push(&self, result: WorkerResult) {
        let mut guard = self.inner.lock().await;
        guard.push(result);
    }

    /// Drain all accumulated results, leaving the sink empty.
    pub async fn drain(&self) -> Vec<WorkerResult> {
        let mut guard = self.inner.lock().await;
        std::mem::take(&mut *guard)
    }
}
