//! C7: Join/Reduce state transition (spec.md §4.7).

use crate::artifact::apply_artifacts;
use plan_core::{PlanState, TurnId, TurnStatus, WorkerRegistry};
use std::collections::HashMap;
use std::sync::Arc;

/// C7. Holds the read-only registry needed to categorize results for
/// artifact construction.
pub struct JoinReduce {
    registry: Arc<WorkerRegistry>,
}

impl JoinReduce {
    /// Build a Join/Reduce step backed by the given registry.
    pub fn new(registry: Arc<WorkerRegistry>) -> Self {
        Self { registry }
    }

    /// Merge this round's worker results into `state` (spec.md §4.7
    /// algorithm steps 1-5, §8 properties 1, 2, 5).
    pub fn join(&self, state: &mut PlanState, turn_id: TurnId) {
        // Step 1 + property 1: drain the accumulator.
        let results = std::mem::take(&mut state.worker_results);

        // Step 2: overlay status/result/error onto sub_goals.
        let by_id: HashMap<u64, usize> = results
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.sub_goal_id.value(), idx))
            .collect();
        for sub_goal in state.sub_goals.iter_mut() {
            if let Some(&idx) = by_id.get(&sub_goal.id.value()) {
                let result = &results[idx];
                sub_goal.status = result.status;
                sub_goal.result = (result.status == plan_core::SubGoalStatus::Success)
                    .then(|| result.outputs.clone());
                sub_goal.error = result.error.clone();
            }
        }

        // Step 3: successful outputs into completed_outputs.
        for result in &results {
            if result.status == plan_core::SubGoalStatus::Success {
                state
                    .completed_outputs
                    .insert(result.sub_goal_id.value(), result.outputs.clone());
            }
        }

        // Step 5: derive artifacts before advancing the round, so
        // bundling can see both the overlaid sub_goals and completed_outputs.
        apply_artifacts(
            &mut state.key_artifacts,
            &results,
            &state.sub_goals,
            &state.completed_outputs,
            &self.registry,
            turn_id,
        );

        // Step 4: advance round, reset status, record a trace line.
        state.round += 1;
        state.status = TurnStatus::Planning;
        state.planner_reasoning = format!(
            "round joined: {} result(s), {} succeeded",
            results.len(),
            results
                .iter()
                .filter(|r| r.status == plan_core::SubGoalStatus::Success)
                .count()
        );

        tracing::debug!(round = state.round, results = results.len(), "join/reduce complete");
    }
}
