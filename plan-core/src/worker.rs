//! The Worker protocol — what one sub-goal's registered capability does
//! when dispatched (spec.md §3, §4.6).
//!
//! Modeled on `layer0::operator::Operator`: a single-method, object-safe,
//! `async_trait`-based boundary. Unlike the teacher's `Provider` trait
//! (RPITIT, generic, not object-safe), `Worker` must be `dyn`-safe because
//! `WorkerRegistry` stores heterogeneous implementations behind one map —
//! the same reason `layer0::operator::Operator` itself uses `async-trait`
//! rather than RPITIT.

use crate::error::WorkerError;
use crate::model::WorkerInput;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a worker body produces on success.
///
/// The executor (`plan-orch-local`) wraps this into a `WorkerResult` with
/// `status = Success`; an `Err(WorkerError)` is wrapped into
/// `status = Failed` (spec.md §3, §4.6).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkerOutcome {
    /// Produced slot → value. Copied verbatim into `completed_outputs`.
    pub outputs: HashMap<String, serde_json::Value>,
    /// Optional human-readable message.
    pub message: Option<String>,
}

impl WorkerOutcome {
    /// Construct an outcome from a single named output slot.
    pub fn single(slot: impl Into<String>, value: serde_json::Value) -> Self {
        let mut outputs = HashMap::new();
        outputs.insert(slot.into(), value);
        Self {
            outputs,
            message: None,
        }
    }
}

/// Protocol — the Worker.
///
/// What one registered capability does when its sub-goal is dispatched.
/// Receives hydrated input, may suspend on LLM calls or data-service calls,
/// returns an outcome or a `WorkerError`.
///
/// Each invocation runs independently of its siblings — a worker must not
/// assume anything about dispatch order or about other sub-goals in the
/// same round (spec.md §4.5, §5).
#[async_trait]
pub trait Worker: Send + Sync {
    /// The worker's registered name. Must match the corresponding
    /// `WorkerCapability::name` in the registry.
    fn name(&self) -> &str;

    /// Execute this worker against its hydrated input.
    ///
    /// A `WorkerError` here is one of the "worker body raises or returns
    /// failed" cases of spec.md §7 — the caller (the executor) converts it
    /// into a failed `WorkerResult`; it must never propagate as a Rust
    /// panic or unwind past this boundary.
    async fn call(&self, input: WorkerInput) -> Result<WorkerOutcome, WorkerError>;
}
