//! `common_helpdesk` — answers general FAQ-style questions directly via the
//! LLM collaborator (spec.md §8 S1).

use async_trait::async_trait;
use plan_core::{GoalType, SynthesisMode, WorkerCapability, WorkerError, WorkerInput, WorkerOutcome};
use plan_llm::{LlmClient, LlmRequest};
use serde_json::Value;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are a helpdesk assistant. Answer the user's \
question directly and concisely, in at most three sentences.";

/// Worker body for `common_helpdesk`.
pub struct CommonHelpdesk {
    llm: Arc<dyn LlmClient>,
}

impl CommonHelpdesk {
    /// Build a new `common_helpdesk` worker over the given LLM collaborator.
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl plan_core::Worker for CommonHelpdesk {
    fn name(&self) -> &str {
        "common_helpdesk"
    }

    async fn call(&self, input: WorkerInput) -> Result<WorkerOutcome, WorkerError> {
        let request = LlmRequest::text(input.sub_goal.description.clone())
            .with_system(SYSTEM_PROMPT);
        let response = self
            .llm
            .complete(request)
            .await
            .map_err(|err| WorkerError::Failed(err.to_string()))?;
        Ok(WorkerOutcome::single(
            "answer",
            Value::String(response.text.trim().to_string()),
        ))
    }
}

/// This worker's registry capability.
pub fn capability() -> WorkerCapability {
    WorkerCapability {
        name: "common_helpdesk".to_string(),
        description: "Answers general FAQ-style questions directly.".to_string(),
        preconditions: vec![],
        outputs: vec!["answer".to_string()],
        goal_type: GoalType::Deliverable,
        memorable_slots: vec![],
        synthesis_mode: SynthesisMode::Narrative,
    }
}
