//! `es_query_gen` — turns a `metadata_lookup` analysis into a query document
//! (spec.md §8 S2).

use async_trait::async_trait;
use plan_core::{GoalType, WorkerError, WorkerInput, WorkerOutcome};
use serde_json::{json, Value};

/// Worker body for `es_query_gen`.
pub struct EsQueryGen;

#[async_trait]
impl plan_core::Worker for EsQueryGen {
    fn name(&self) -> &str {
        "es_query_gen"
    }

    async fn call(&self, input: WorkerInput) -> Result<WorkerOutcome, WorkerError> {
        let analysis = input
            .resolved_inputs
            .get("analysis")
            .cloned()
            .unwrap_or_else(|| json!({}));
        let entity_mappings = analysis
            .get("entity_mappings")
            .cloned()
            .unwrap_or_else(|| json!({}));
        let query: Value = json!({ "bool": { "filter": entity_mappings } });
        Ok(WorkerOutcome::single("es_query", query))
    }
}

/// This worker's registry capability.
pub fn capability() -> plan_core::WorkerCapability {
    plan_core::WorkerCapability {
        name: "es_query_gen".to_string(),
        description: "Builds a search query document from a resolved entity analysis."
            .to_string(),
        preconditions: vec!["requires an `analysis` input from `metadata_lookup`".to_string()],
        outputs: vec!["es_query".to_string()],
        goal_type: GoalType::Support,
        memorable_slots: vec!["es_query".to_string()],
        synthesis_mode: Default::default(),
    }
}
