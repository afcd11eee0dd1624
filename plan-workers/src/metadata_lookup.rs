//! `metadata_lookup` — resolves free-text entities (carriers, ports) into
//! canonical codes (spec.md §8 S2).
//!
//! A heuristic dictionary lookup, not an LLM call or a production reference
//! database — enough to drive the entity-resolution-then-query scenario.

use async_trait::async_trait;
use plan_core::{GoalType, WorkerError, WorkerInput, WorkerOutcome};
use serde_json::json;

const KNOWN_CARRIERS: &[(&str, &str)] = &[
    ("maersk", "MAEU"),
    ("msc", "MSCU"),
    ("cma cgm", "CMDU"),
    ("evergreen", "EGLV"),
];

const KNOWN_PORTS: &[(&str, &str)] = &[
    ("miami", "USMIA"),
    ("los angeles", "USLAX"),
    ("rotterdam", "NLRTM"),
    ("singapore", "SGSIN"),
];

/// Worker body for `metadata_lookup`.
pub struct MetadataLookup;

#[async_trait]
impl plan_core::Worker for MetadataLookup {
    fn name(&self) -> &str {
        "metadata_lookup"
    }

    async fn call(&self, input: WorkerInput) -> Result<WorkerOutcome, WorkerError> {
        let text = input.sub_goal.description.to_lowercase();
        let mut entity_mappings = serde_json::Map::new();
        for (name, code) in KNOWN_CARRIERS {
            if text.contains(name) {
                entity_mappings.insert("carrier".to_string(), json!(code));
            }
        }
        for (name, code) in KNOWN_PORTS {
            if text.contains(name) {
                entity_mappings.insert("destination_port".to_string(), json!(code));
            }
        }
        let confidence = if entity_mappings.is_empty() { 0.3 } else { 0.9 };
        let analysis_result = json!({
            "intent_type": "search",
            "entity_mappings": entity_mappings,
            "confidence": confidence,
        });
        Ok(WorkerOutcome::single("analysis_result", analysis_result))
    }
}

/// This worker's registry capability.
pub fn capability() -> plan_core::WorkerCapability {
    plan_core::WorkerCapability {
        name: "metadata_lookup".to_string(),
        description: "Resolves carrier and port names mentioned in the goal into canonical codes."
            .to_string(),
        preconditions: vec![],
        outputs: vec!["analysis_result".to_string()],
        goal_type: GoalType::Support,
        memorable_slots: vec!["analysis_result".to_string()],
        synthesis_mode: Default::default(),
    }
}
