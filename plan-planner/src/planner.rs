//! C4: the per-round planning decision engine (spec.md §4.4).

use crate::decision::{Decision, PlanningDecision, ProposedSubGoal};
use crate::prompt::build_planning_prompt;
use plan_core::{
    validate_input_ref, InputRefError, PlanError, PlanState, SubGoal, SubGoalId, SubGoalStatus,
    TurnStatus, WorkerRegistry,
};
use plan_llm::{LlmClient, LlmRequest};
use std::collections::HashSet;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are the planning engine of a task decomposition system. \
    Given the user's goal, the registry of available workers, and the current plan state, \
    reply with a single JSON object matching the planning decision schema: \
    {\"decision\": \"continue\"|\"done\"|\"failed\", \"sub_goals\": [...], \
    \"synthesis_inputs\": {...} | null, \"reasoning\": \"...\", \"failure_reason\": \"...\" | null}. \
    Do not re-propose a sub-goal already listed as pending. \
    Reply with the JSON object only, no surrounding text.";

/// C4. Holds the LLM collaborator and a shared view of the worker registry;
/// both are read-only after construction (spec.md §4.2, §5).
pub struct Planner {
    llm: Arc<dyn LlmClient>,
    registry: Arc<WorkerRegistry>,
}

impl Planner {
    /// Build a planner backed by the given LLM collaborator and registry.
    pub fn new(llm: Arc<dyn LlmClient>, registry: Arc<WorkerRegistry>) -> Self {
        Self { llm, registry }
    }

    /// Run one planning round, mutating `state` in place.
    ///
    /// Returns `Err` exactly when the round ended the turn (`status` was
    /// set to `Failed`) — the error is for diagnostics/logging; the
    /// resulting `PlanState` already reflects the outcome (spec.md §7:
    /// "errors never cross the sub-goal boundary implicitly").
    pub async fn plan_round(&self, state: &mut PlanState) -> Result<(), PlanError> {
        // Rule 1: round budget.
        if state.round > state.max_rounds {
            let err = PlanError::BudgetExhausted {
                round: state.round,
                max_rounds: state.max_rounds,
            };
            self.fail_turn(state, &err);
            return Err(err);
        }

        // Rule 2: empty question.
        if state.question.trim().is_empty() {
            let err = PlanError::EmptyQuestion;
            self.fail_turn(state, &err);
            return Err(err);
        }

        let prompt = build_planning_prompt(state, &self.registry);
        let request = LlmRequest::json(prompt).with_system(SYSTEM_PROMPT);
        let decision = match self.llm.complete(request).await {
            Ok(response) => serde_json::from_str::<PlanningDecision>(&response.text)
                .map_err(|e| PlanError::LlmFailed(e.to_string())),
            Err(e) => Err(PlanError::LlmFailed(e.to_string())),
        };

        let decision = match decision {
            Ok(d) => d,
            Err(err) => {
                self.fail_turn(state, &err);
                return Err(err);
            }
        };

        match decision.decision {
            Decision::Failed => {
                let err = PlanError::LlmFailed(
                    decision
                        .failure_reason
                        .unwrap_or_else(|| "planner declared failed".to_string()),
                );
                self.fail_turn(state, &err);
                Err(err)
            }
            Decision::Done => {
                self.apply_done(state, decision);
                Ok(())
            }
            Decision::Continue => {
                // Rule 3: no-op guard.
                if decision.sub_goals.is_empty() {
                    let err = PlanError::NoOpContinue;
                    self.fail_turn(state, &err);
                    return Err(err);
                }
                self.apply_continue(state, decision.sub_goals, decision.reasoning);
                Ok(())
            }
        }
    }

    fn fail_turn(&self, state: &mut PlanState, err: &PlanError) {
        state.status = TurnStatus::Failed;
        state.planner_reasoning = err.to_string();
        tracing::warn!(error = %err, "planning round ended the turn");
    }

    /// Rule 4 (InputRef two-pass validation) + sub-goal creation.
    fn apply_continue(&self, state: &mut PlanState, proposed: Vec<ProposedSubGoal>, reasoning: String) {
        let existing_ids: HashSet<u64> = state.sub_goals.iter().map(|sg| sg.id.value()).collect();
        let completed_ids: HashSet<u64> = state.completed_outputs.keys().copied().collect();

        let mut next_id = state.next_sub_goal_id();
        let mut batch: Vec<SubGoal> = Vec::with_capacity(proposed.len());
        let new_batch_ids: HashSet<u64> = (0..proposed.len() as u64)
            .map(|offset| next_id.value() + offset)
            .collect();
        let valid_ids: HashSet<u64> = existing_ids
            .union(&completed_ids)
            .copied()
            .collect::<HashSet<_>>()
            .union(&new_batch_ids)
            .copied()
            .collect();

        for proposal in proposed {
            let outputs = self
                .registry
                .capability(&proposal.worker)
                .map(|c| c.outputs.clone())
                .unwrap_or_default();
            let mut sub_goal = SubGoal::new(
                next_id,
                proposal.worker,
                proposal.description,
                proposal.goal_type,
                outputs,
            );
            sub_goal.params = proposal.params;
            sub_goal.inputs = proposal.inputs;

            if let Some(err) = self.first_invalid_input_ref(
                &sub_goal,
                &valid_ids,
                &state.completed_outputs,
                &state.sub_goals,
                &batch,
            ) {
                sub_goal.fail_input_ref(&err);
            }

            batch.push(sub_goal);
            next_id = next_id.next();
        }

        state.sub_goals.extend(batch);
        state.status = TurnStatus::Executing;
        state.planner_reasoning = reasoning;
    }

    fn first_invalid_input_ref(
        &self,
        sub_goal: &SubGoal,
        valid_ids: &HashSet<u64>,
        completed_outputs: &std::collections::HashMap<u64, std::collections::HashMap<String, serde_json::Value>>,
        existing: &[SubGoal],
        batch_so_far: &[SubGoal],
    ) -> Option<InputRefError> {
        let declared_outputs = |id: SubGoalId| -> Option<Vec<String>> {
            existing
                .iter()
                .chain(batch_so_far.iter())
                .find(|sg| sg.id == id)
                .map(|sg| sg.outputs.clone())
        };
        for (name, input_ref) in &sub_goal.inputs {
            if let Err(err) =
                validate_input_ref(name, input_ref, valid_ids, completed_outputs, &declared_outputs)
            {
                return Some(err);
            }
        }
        None
    }

    /// Rule 7 (done path): drop `synthesis_inputs` entries that don't
    /// resolve against `completed_outputs`, with a warning, but never fail
    /// the turn over it.
    fn apply_done(&self, state: &mut PlanState, decision: PlanningDecision) {
        let filtered = decision.synthesis_inputs.map(|inputs| {
            inputs
                .into_iter()
                .filter(|(name, input_ref)| {
                    let ok = state
                        .completed_outputs
                        .get(&input_ref.from_sub_goal.value())
                        .is_some_and(|slots| slots.contains_key(&input_ref.slot));
                    if !ok {
                        tracing::warn!(
                            input = %name,
                            from = input_ref.from_sub_goal.value(),
                            slot = %input_ref.slot,
                            "dropping synthesis_inputs entry: does not resolve"
                        );
                    }
                    ok
                })
                .collect()
        });
        state.synthesis_inputs = filtered;
        state.status = TurnStatus::Done;
        state.planner_reasoning = decision.reasoning;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_core::InputRef;
    use plan_llm::test_utils::QueuedLlmClient;
    use std::collections::HashMap;

    fn registry() -> Arc<WorkerRegistry> {
        Arc::new(WorkerRegistry::new())
    }

    #[tokio::test]
    async fn round_budget_exhaustion_fails_the_turn() {
        let mut state = PlanState::new("q", vec![], 2);
        state.round = 3;
        let planner = Planner::new(Arc::new(QueuedLlmClient::new(Vec::<String>::new())), registry());
        let err = planner.plan_round(&mut state).await.unwrap_err();
        assert!(matches!(err, PlanError::BudgetExhausted { .. }));
        assert_eq!(state.status, TurnStatus::Failed);
    }

    #[tokio::test]
    async fn empty_question_fails_the_turn() {
        let mut state = PlanState::new("   ", vec![], 10);
        let planner = Planner::new(Arc::new(QueuedLlmClient::new(Vec::<String>::new())), registry());
        let err = planner.plan_round(&mut state).await.unwrap_err();
        assert!(matches!(err, PlanError::EmptyQuestion));
    }

    #[tokio::test]
    async fn no_op_continue_fails_the_turn() {
        let mut state = PlanState::new("find x", vec![], 10);
        let decision = serde_json::json!({"decision": "continue", "sub_goals": [], "reasoning": "thinking"});
        let llm = Arc::new(QueuedLlmClient::new([decision.to_string()]));
        let planner = Planner::new(llm, registry());
        let err = planner.plan_round(&mut state).await.unwrap_err();
        assert!(matches!(err, PlanError::NoOpContinue));
    }

    #[tokio::test]
    async fn continue_creates_sub_goals_with_sequential_ids() {
        let mut state = PlanState::new("find x", vec![], 10);
        let decision = serde_json::json!({
            "decision": "continue",
            "sub_goals": [
                {"worker": "metadata_lookup", "description": "resolve entities", "goal_type": "support"},
                {"worker": "es_query_gen", "description": "build query", "goal_type": "support"}
            ],
            "reasoning": "two steps"
        });
        let llm = Arc::new(QueuedLlmClient::new([decision.to_string()]));
        let planner = Planner::new(llm, registry());
        planner.plan_round(&mut state).await.unwrap();
        assert_eq!(state.status, TurnStatus::Executing);
        assert_eq!(state.sub_goals.len(), 2);
        assert_eq!(state.sub_goals[0].id, SubGoalId(1));
        assert_eq!(state.sub_goals[1].id, SubGoalId(2));
    }

    #[tokio::test]
    async fn bad_input_ref_pre_fails_only_that_sub_goal() {
        let mut state = PlanState::new("find x", vec![], 10);
        let mut inputs = HashMap::new();
        inputs.insert("q".to_string(), InputRef::new(999u64, "es_query"));
        let decision_value = serde_json::json!({
            "decision": "continue",
            "sub_goals": [
                {"worker": "ok_worker", "description": "fine", "goal_type": "support"},
                {"worker": "bad_worker", "description": "bad", "goal_type": "support", "inputs": inputs}
            ],
            "reasoning": "batch"
        });
        let llm = Arc::new(QueuedLlmClient::new([decision_value.to_string()]));
        let planner = Planner::new(llm, registry());
        planner.plan_round(&mut state).await.unwrap();
        assert_eq!(state.sub_goals[0].status, SubGoalStatus::Pending);
        assert_eq!(state.sub_goals[1].status, SubGoalStatus::Failed);
        assert!(state.sub_goals[1].error.is_some());
    }

    #[tokio::test]
    async fn done_filters_unresolvable_synthesis_inputs() {
        let mut state = PlanState::new("find x", vec![], 10);
        state
            .completed_outputs
            .insert(1, HashMap::from([("answer".to_string(), serde_json::json!("hi"))]));
        let decision = serde_json::json!({
            "decision": "done",
            "synthesis_inputs": {
                "ok": {"from_sub_goal": 1, "slot": "answer"},
                "bad": {"from_sub_goal": 999, "slot": "x"}
            },
            "reasoning": "done"
        });
        let llm = Arc::new(QueuedLlmClient::new([decision.to_string()]));
        let planner = Planner::new(llm, registry());
        planner.plan_round(&mut state).await.unwrap();
        assert_eq!(state.status, TurnStatus::Done);
        let inputs = state.synthesis_inputs.unwrap();
        assert_eq!(inputs.len(), 1);
        assert!(inputs.contains_key("ok"));
    }
}
