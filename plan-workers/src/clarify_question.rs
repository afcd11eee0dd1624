//! `clarify_question` — asks the user a clarifying question instead of
//! guessing (spec.md §4.4, §7 edge cases).

use async_trait::async_trait;
use plan_core::{GoalType, SynthesisMode, WorkerError, WorkerInput, WorkerOutcome};
use serde_json::json;

/// Worker body for `clarify_question`.
pub struct ClarifyQuestion;

#[async_trait]
impl plan_core::Worker for ClarifyQuestion {
    fn name(&self) -> &str {
        "clarify_question"
    }

    async fn call(&self, input: WorkerInput) -> Result<WorkerOutcome, WorkerError> {
        let message = format!(
            "Could you clarify what you mean by: {}?",
            input.sub_goal.description
        );
        Ok(WorkerOutcome::single("clarification_message", json!(message)))
    }
}

/// This worker's registry capability.
pub fn capability() -> plan_core::WorkerCapability {
    plan_core::WorkerCapability {
        name: "clarify_question".to_string(),
        description: "Asks the user a clarifying question instead of guessing.".to_string(),
        preconditions: vec![],
        outputs: vec!["clarification_message".to_string()],
        goal_type: GoalType::Deliverable,
        memorable_slots: vec![],
        synthesis_mode: SynthesisMode::Narrative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_core::{SubGoal, SubGoalId, Worker};
    use std::collections::HashMap;

    #[tokio::test]
    async fn asks_about_the_sub_goal_description() {
        let worker = ClarifyQuestion;
        let sub_goal = SubGoal::new(
            SubGoalId::from(1u64),
            "clarify_question",
            "which carrier",
            GoalType::Deliverable,
            vec!["clarification_message".to_string()],
        );
        let outcome = worker
            .call(WorkerInput {
                sub_goal,
                resolved_inputs: HashMap::new(),
            })
            .await
            .unwrap();
        let message = outcome.outputs["clarification_message"].as_str().unwrap();
        assert!(message.contains("which carrier"));
    }
}
