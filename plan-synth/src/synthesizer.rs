//! The Synthesizer itself (spec.md §4.8).

use crate::select::{select_inputs, SelectedSlot};
use plan_core::{PlanState, SynthesisError, SynthesisMode, TurnStatus, WorkerRegistry};
use plan_llm::{LlmClient, LlmRequest};
use std::sync::Arc;

const SYSTEM_PROMPT: &str =
    "You write a concise, direct answer to the user's question from the provided facts. \
     Do not invent information not present in the facts.";

/// A fixed fallback used when both the narrative and display parts are
/// empty (spec.md §4.8 "Assembly").
const NOTHING_TO_SAY: &str = "I wasn't able to complete your request.";

/// C8. Holds the LLM collaborator (for the narrative summarization pass)
/// and the registry (to look up each producing worker's `synthesis_mode`).
pub struct Synthesizer {
    llm: Arc<dyn LlmClient>,
    registry: Arc<WorkerRegistry>,
}

impl Synthesizer {
    /// Build a synthesizer backed by the given LLM collaborator and registry.
    pub fn new(llm: Arc<dyn LlmClient>, registry: Arc<WorkerRegistry>) -> Self {
        Self { llm, registry }
    }

    /// Produce the final response and mark the turn done.
    pub async fn synthesize(&self, state: &mut PlanState) -> Result<(), SynthesisError> {
        let selected = select_inputs(state);
        let (narrative_slots, display_slots) = self.partition(state, &selected);

        let narrative_part = if narrative_slots.is_empty() {
            String::new()
        } else {
            self.summarize(&state.question, &narrative_slots).await?
        };
        let display_part = render_display(&display_slots);

        state.final_response = Some(assemble(&narrative_part, &display_part));
        state.status = TurnStatus::Done;
        state.planner_reasoning = "synthesis complete".to_string();
        Ok(())
    }

    fn partition(
        &self,
        state: &PlanState,
        selected: &[SelectedSlot],
    ) -> (Vec<serde_json::Value>, Vec<serde_json::Value>) {
        let mut narrative = Vec::new();
        let mut display = Vec::new();
        for slot in selected {
            let mode = state
                .sub_goal(slot.from)
                .and_then(|sg| self.registry.capability(&sg.worker))
                .map(|cap| cap.synthesis_mode)
                .unwrap_or_default();
            match mode {
                SynthesisMode::Narrative => narrative.push(slot.value.clone()),
                SynthesisMode::Display => display.push(slot.value.clone()),
                SynthesisMode::Hidden => {
                    tracing::debug!(from = slot.from.value(), slot = %slot.slot, "excluding hidden slot from synthesis");
                }
            }
        }
        (narrative, display)
    }

    async fn summarize(
        &self,
        question: &str,
        facts: &[serde_json::Value],
    ) -> Result<String, SynthesisError> {
        let rendered: Vec<String> = facts.iter().map(render_value).collect();
        let prompt = format!(
            "user question: {question}\n\nfacts:\n{}",
            rendered.join("\n---\n")
        );
        let request = LlmRequest::text(prompt).with_system(SYSTEM_PROMPT);
        let response = self
            .llm
            .complete(request)
            .await
            .map_err(|e| SynthesisError::LlmFailed(e.to_string()))?;
        Ok(response.text.trim().to_string())
    }
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_display(values: &[serde_json::Value]) -> String {
    values.iter().map(render_value).collect::<Vec<_>>().join("\n\n")
}

fn assemble(narrative_part: &str, display_part: &str) -> String {
    match (narrative_part.is_empty(), display_part.is_empty()) {
        (true, true) => NOTHING_TO_SAY.to_string(),
        (false, true) => narrative_part.to_string(),
        (true, false) => display_part.to_string(),
        (false, false) => format!("{narrative_part}\n\n{display_part}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_core::{GoalType, SubGoal, SubGoalId, SubGoalStatus, WorkerCapability};
    use plan_llm::test_utils::QueuedLlmClient;
    use std::collections::HashMap;

    fn registry_with(name: &str, mode: SynthesisMode) -> Arc<WorkerRegistry> {
        let mut r = WorkerRegistry::new();
        r.register(
            WorkerCapability {
                name: name.to_string(),
                description: String::new(),
                preconditions: vec![],
                outputs: vec!["answer".to_string()],
                goal_type: GoalType::Deliverable,
                memorable_slots: vec![],
                synthesis_mode: mode,
            },
            Arc::new(NoopWorker),
        )
        .unwrap();
        Arc::new(r)
    }

    struct NoopWorker;
    #[async_trait::async_trait]
    impl plan_core::Worker for NoopWorker {
        fn name(&self) -> &str {
            "noop"
        }
        async fn call(
            &self,
            _input: plan_core::WorkerInput,
        ) -> Result<plan_core::WorkerOutcome, plan_core::WorkerError> {
            Ok(plan_core::WorkerOutcome::default())
        }
    }

    fn state_with_answer(worker: &str) -> PlanState {
        let mut state = PlanState::new("what is a bill of lading?", vec![], 10);
        let mut sg = SubGoal::new(SubGoalId(1), worker, "answer faq", GoalType::Deliverable, vec!["answer".to_string()]);
        sg.status = SubGoalStatus::Success;
        state.sub_goals = vec![sg];
        state.completed_outputs.insert(
            1,
            HashMap::from([("answer".to_string(), serde_json::json!("A bill of lading is..."))]),
        );
        state
    }

    #[tokio::test]
    async fn narrative_mode_routes_through_llm_summarizer() {
        let mut state = state_with_answer("common_helpdesk");
        let registry = registry_with("common_helpdesk", SynthesisMode::Narrative);
        let llm = Arc::new(QueuedLlmClient::new(["A bill of lading is a shipping document."]));
        let synth = Synthesizer::new(llm, registry);
        synth.synthesize(&mut state).await.unwrap();
        assert_eq!(state.status, TurnStatus::Done);
        assert_eq!(
            state.final_response.unwrap(),
            "A bill of lading is a shipping document."
        );
    }

    #[tokio::test]
    async fn display_mode_is_verbatim_no_llm_call() {
        let mut state = state_with_answer("show_results");
        let registry = registry_with("show_results", SynthesisMode::Display);
        let llm = Arc::new(QueuedLlmClient::new(Vec::<String>::new()));
        let synth = Synthesizer::new(llm, registry);
        synth.synthesize(&mut state).await.unwrap();
        assert_eq!(state.final_response.unwrap(), "A bill of lading is...");
    }

    #[tokio::test]
    async fn hidden_mode_excludes_the_slot_and_falls_back_to_default_message() {
        let mut state = state_with_answer("internal_worker");
        let registry = registry_with("internal_worker", SynthesisMode::Hidden);
        let llm = Arc::new(QueuedLlmClient::new(Vec::<String>::new()));
        let synth = Synthesizer::new(llm, registry);
        synth.synthesize(&mut state).await.unwrap();
        assert_eq!(state.final_response.unwrap(), NOTHING_TO_SAY);
    }

    #[test]
    fn assemble_joins_narrative_and_display_with_blank_line() {
        assert_eq!(assemble("hello", "table"), "hello\n\ntable");
        assert_eq!(assemble("hello", ""), "hello");
        assert_eq!(assemble("", "table"), "table");
        assert_eq!(assemble("", ""), NOTHING_TO_SAY);
    }
}
