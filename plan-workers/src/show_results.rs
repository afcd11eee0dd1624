//! `show_results` — surfaces an upstream `formatted_results` slot verbatim
//! as the deliverable of a search turn (spec.md §8 S2).

use async_trait::async_trait;
use plan_core::{GoalType, SynthesisMode, WorkerError, WorkerInput, WorkerOutcome};
use serde_json::json;

/// Worker body for `show_results`.
pub struct ShowResults;

#[async_trait]
impl plan_core::Worker for ShowResults {
    fn name(&self) -> &str {
        "show_results"
    }

    async fn call(&self, input: WorkerInput) -> Result<WorkerOutcome, WorkerError> {
        let results = input
            .resolved_inputs
            .get("results")
            .cloned()
            .unwrap_or_else(|| json!("No results to show."));
        Ok(WorkerOutcome::single("formatted_results", results))
    }
}

/// This worker's registry capability.
pub fn capability() -> plan_core::WorkerCapability {
    plan_core::WorkerCapability {
        name: "show_results".to_string(),
        description: "Surfaces a search result page as the turn's deliverable.".to_string(),
        preconditions: vec!["requires a `results` input from `es_query_exec`".to_string()],
        outputs: vec!["formatted_results".to_string()],
        goal_type: GoalType::Deliverable,
        memorable_slots: vec![],
        synthesis_mode: SynthesisMode::Display,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_core::{SubGoal, SubGoalId, Worker};
    use std::collections::HashMap;

    #[tokio::test]
    async fn passes_results_through_verbatim() {
        let worker = ShowResults;
        let sub_goal = SubGoal::new(
            SubGoalId::from(4u64),
            "show_results",
            "show the results",
            GoalType::Deliverable,
            vec!["formatted_results".to_string()],
        );
        let mut resolved_inputs = HashMap::new();
        resolved_inputs.insert("results".to_string(), json!("45 result(s) found."));
        let outcome = worker
            .call(WorkerInput {
                sub_goal,
                resolved_inputs,
            })
            .await
            .unwrap();
        assert_eq!(outcome.outputs["formatted_results"], json!("45 result(s) found."));
    }
}
