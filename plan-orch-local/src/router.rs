//! C5: Dispatch Router (spec.md §4.5).
//!
//! Pure function of state for routing; the parallel-fan-out piece is the
//! one place this core suspends by design (spec.md §5: "Worker bodies ...
//! are the only suspension points").

use crate::executor::execute_one;
use plan_core::validate::is_ready;
use plan_core::{
    PlanState, SubGoalId, SubGoalStatus, WorkerInput, WorkerRegistry, WorkerResult,
    WorkerResultsSink,
};
use std::sync::Arc;

/// C5 + C6 wired together: computes ready sub-goals, hydrates their
/// inputs, and runs one worker per ready sub-goal concurrently.
pub struct DispatchRouter {
    registry: Arc<WorkerRegistry>,
}

impl DispatchRouter {
    /// Build a dispatch router backed by the given (read-only) registry.
    pub fn new(registry: Arc<WorkerRegistry>) -> Self {
        Self { registry }
    }

    /// Ids of pending sub-goals whose dependencies have all resolved
    /// (spec.md §4.5, §8 property 4). Order is unspecified.
    pub fn ready_ids(&self, state: &PlanState) -> Vec<SubGoalId> {
        state
            .sub_goals
            .iter()
            .filter(|sg| sg.status == SubGoalStatus::Pending)
            .filter(|sg| is_ready(&sg.inputs, &state.completed_outputs))
            .map(|sg| sg.id)
            .collect()
    }

    fn hydrate(&self, state: &PlanState, id: SubGoalId) -> WorkerInput {
        let sub_goal = state
            .sub_goal(id)
            .expect("ready id was computed from this state's sub_goals")
            .clone();
        let resolved_inputs = sub_goal
            .inputs
            .iter()
            .map(|(name, input_ref)| {
                let value = state
                    .completed_outputs
                    .get(&input_ref.from_sub_goal.value())
                    .and_then(|slots| slots.get(&input_ref.slot))
                    .cloned()
                    .expect("readiness check already confirmed this InputRef resolves");
                (name.clone(), value)
            })
            .collect();
        WorkerInput {
            sub_goal,
            resolved_inputs,
        }
    }

    /// Dispatch every ready sub-goal this round, in parallel, and collect
    /// their results. Returns an empty vec if nothing is ready (spec.md
    /// §4.5: "route to Join/Reduce" either way — a no-op round still
    /// advances).
    ///
    /// Each task contributes its result to a shared [`WorkerResultsSink`]
    /// (spec.md §4.1's `worker_results` reducer) as it finishes; once every
    /// task has been awaited, the sink is drained once at the rendezvous
    /// point, the same barrier `join` performs after this call returns.
    pub async fn dispatch_round(&self, state: &PlanState) -> Vec<WorkerResult> {
        let ready = self.ready_ids(state);
        if ready.is_empty() {
            return Vec::new();
        }

        let sink = WorkerResultsSink::new();
        let mut handles = Vec::with_capacity(ready.len());
        for id in ready {
            let input = self.hydrate(state, id);
            let registry = Arc::clone(&self.registry);
            let sink = sink.clone();
            handles.push((
                id,
                tokio::spawn(async move {
                    let result = execute_one(&registry, input).await;
                    sink.push(result).await;
                }),
            ));
        }

        for (id, handle) in handles {
            if let Err(join_err) = handle.await {
                tracing::warn!(sub_goal_id = id.value(), error = %join_err, "worker task panicked");
                sink.push(WorkerResult::failed(id, join_err.to_string())).await;
            }
        }
        sink.drain().await
    }
}
