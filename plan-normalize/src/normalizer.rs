//! The Normalizer itself (spec.md §4.3).

use crate::history::format_recent_history;
use crate::slots::build_context_slots;
use plan_core::TurnSummary;
use plan_llm::{LlmClient, LlmRequest};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You rewrite a user's raw request into a single, \
    actionable goal. Resolve pronouns against the conversation history. \
    Number multiple intents. Sharpen vague phrases. Reply with the rewritten \
    goal text only.";

/// What normalization contributes to `PlanState` (spec.md §4.3): the
/// normalized `question`, a `planner_reasoning` trace line, and the
/// `completed_outputs[0]` context slot table.
#[derive(Debug, Clone)]
pub struct NormalizeOutcome {
    /// The normalized actionable goal.
    pub question: String,
    /// Short rationale, appended to `PlanState::planner_reasoning`.
    pub planner_reasoning: String,
    /// `completed_outputs[0]`.
    pub context_slots: HashMap<String, Value>,
}

/// C3: normalizes a raw utterance plus conversation history into a goal and
/// context slot table.
///
/// Never fails the turn (spec.md §4.3 failure policy): any LLM collaborator
/// error falls back to the raw utterance and is recorded in
/// `planner_reasoning` instead of propagating.
pub struct Normalizer {
    llm: Arc<dyn LlmClient>,
}

impl Normalizer {
    /// Build a normalizer backed by the given LLM collaborator.
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Normalize one raw utterance against the given history.
    pub async fn normalize(&self, raw_utterance: &str, history: &[TurnSummary]) -> NormalizeOutcome {
        let context_slots = build_context_slots(raw_utterance, history);

        let prompt = format!(
            "conversation history:\n{}\nuser request: {raw_utterance}",
            format_recent_history(history)
        );
        let request = LlmRequest::text(prompt).with_system(SYSTEM_PROMPT);

        match self.llm.complete(request).await {
            Ok(response) => {
                let normalized = response.text.trim();
                if normalized.is_empty() {
                    tracing::warn!("normalizer received empty rewrite, falling back to raw utterance");
                    NormalizeOutcome {
                        question: raw_utterance.to_string(),
                        planner_reasoning: "normalization returned empty text; used raw utterance"
                            .to_string(),
                        context_slots,
                    }
                } else {
                    NormalizeOutcome {
                        question: normalized.to_string(),
                        planner_reasoning: "normalized via LLM collaborator".to_string(),
                        context_slots,
                    }
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "normalizer collaborator failed, falling back to raw utterance");
                NormalizeOutcome {
                    question: raw_utterance.to_string(),
                    planner_reasoning: format!("normalization failed ({err}); used raw utterance"),
                    context_slots,
                }
            }
        }
    }
}
