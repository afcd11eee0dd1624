//! `explain_metadata` — renders a `metadata_lookup` analysis as a prose
//! explanation of how entities were resolved (spec.md §8 S2).

use async_trait::async_trait;
use plan_core::{GoalType, SynthesisMode, WorkerError, WorkerInput, WorkerOutcome};
use serde_json::json;

/// Worker body for `explain_metadata`.
pub struct ExplainMetadata;

#[async_trait]
impl plan_core::Worker for ExplainMetadata {
    fn name(&self) -> &str {
        "explain_metadata"
    }

    async fn call(&self, input: WorkerInput) -> Result<WorkerOutcome, WorkerError> {
        let analysis = input
            .resolved_inputs
            .get("analysis")
            .cloned()
            .unwrap_or_else(|| json!({}));
        let mappings = analysis
            .get("entity_mappings")
            .and_then(|v| v.as_object())
            .cloned()
            .unwrap_or_default();
        let explanation = if mappings.is_empty() {
            "No entities were recognized in the request.".to_string()
        } else {
            let parts: Vec<String> = mappings
                .iter()
                .map(|(k, v)| format!("{k} resolved to {v}"))
                .collect();
            format!("Resolved entities: {}.", parts.join(", "))
        };
        Ok(WorkerOutcome::single("explanation", json!(explanation)))
    }
}

/// This worker's registry capability.
pub fn capability() -> plan_core::WorkerCapability {
    plan_core::WorkerCapability {
        name: "explain_metadata".to_string(),
        description: "Explains which entities were resolved from the user's request.".to_string(),
        preconditions: vec!["requires an `analysis` input from `metadata_lookup`".to_string()],
        outputs: vec!["explanation".to_string()],
        goal_type: GoalType::Deliverable,
        memorable_slots: vec![],
        synthesis_mode: SynthesisMode::Narrative,
    }
}
