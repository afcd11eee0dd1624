//! `analyze_results` — summarizes a search result page via the LLM
//! collaborator (spec.md §8 S2).

use async_trait::async_trait;
use plan_core::{GoalType, SynthesisMode, WorkerError, WorkerInput, WorkerOutcome};
use plan_llm::{LlmClient, LlmRequest};
use serde_json::json;
use std::sync::Arc;

const SYSTEM_PROMPT: &str =
    "You are summarizing search results for a user. Be brief and factual.";

/// Worker body for `analyze_results`.
pub struct AnalyzeResults {
    llm: Arc<dyn LlmClient>,
}

impl AnalyzeResults {
    /// Build a new `analyze_results` worker over the given LLM collaborator.
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl plan_core::Worker for AnalyzeResults {
    fn name(&self) -> &str {
        "analyze_results"
    }

    async fn call(&self, input: WorkerInput) -> Result<WorkerOutcome, WorkerError> {
        let results = input
            .resolved_inputs
            .get("results")
            .cloned()
            .unwrap_or_else(|| json!("no results"));
        let prompt = format!("Summarize these search results: {results}");
        let response = self
            .llm
            .complete(LlmRequest::text(prompt).with_system(SYSTEM_PROMPT))
            .await
            .map_err(|err| WorkerError::Failed(err.to_string()))?;
        Ok(WorkerOutcome::single(
            "analysis",
            json!(response.text.trim()),
        ))
    }
}

/// This worker's registry capability.
pub fn capability() -> plan_core::WorkerCapability {
    plan_core::WorkerCapability {
        name: "analyze_results".to_string(),
        description: "Summarizes a page of search results.".to_string(),
        preconditions: vec!["requires a `results` input from `es_query_exec`".to_string()],
        outputs: vec!["analysis".to_string()],
        goal_type: GoalType::Deliverable,
        memorable_slots: vec![],
        synthesis_mode: SynthesisMode::Narrative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_core::{SubGoal, SubGoalId, Worker};
    use plan_llm::test_utils::QueuedLlmClient;
    use std::collections::HashMap;

    #[tokio::test]
    async fn summarizes_results_via_the_llm() {
        let llm = Arc::new(QueuedLlmClient::new(["Most shipments cleared on time."]));
        let worker = AnalyzeResults::new(llm);
        let sub_goal = SubGoal::new(
            SubGoalId::from(6u64),
            "analyze_results",
            "analyze",
            GoalType::Deliverable,
            vec!["analysis".to_string()],
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
        assert_eq!(
            outcome.outputs["analysis"],
            json!("Most shipments cleared on time.")
        );
    }
}
