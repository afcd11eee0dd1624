//! `page_query` — continues a prior search from a remembered cursor
//! (spec.md §8 S3). Reads `prior_es_query`/`prior_next_offset`/
//! `prior_page_size` context slots lifted from slot 0 by the normalizer.

use async_trait::async_trait;
use plan_core::{DataService, GoalType, SynthesisMode, WorkerError, WorkerInput, WorkerOutcome};
use serde_json::json;
use std::sync::Arc;

const DEFAULT_PAGE_SIZE: u64 = 20;

/// Worker body for `page_query`.
pub struct PageQuery {
    data_service: Arc<dyn DataService>,
}

impl PageQuery {
    /// Build a new `page_query` worker over the given data-service
    /// collaborator.
    pub fn new(data_service: Arc<dyn DataService>) -> Self {
        Self { data_service }
    }
}

#[async_trait]
impl plan_core::Worker for PageQuery {
    fn name(&self) -> &str {
        "page_query"
    }

    async fn call(&self, input: WorkerInput) -> Result<WorkerOutcome, WorkerError> {
        let query = input
            .resolved_inputs
            .get("prior_es_query")
            .cloned()
            .unwrap_or_else(|| json!({}));
        let offset = input
            .resolved_inputs
            .get("prior_next_offset")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        let page_size = input
            .resolved_inputs
            .get("prior_page_size")
            .and_then(|v| v.as_u64())
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let response = self
            .data_service
            .paginate(query.clone(), page_size as u32, offset as u32)
            .await
            .map_err(|err| WorkerError::Failed(err.to_string()))?;

        let hit_count = response.hits.total.value;
        let next_offset = offset + page_size;
        let formatted_results =
            format!("Continuing from result {offset}: {hit_count} total result(s).");

        let mut outcome = WorkerOutcome::default();
        outcome
            .outputs
            .insert("formatted_results".to_string(), json!(formatted_results));
        outcome.outputs.insert("es_query".to_string(), query);
        outcome
            .outputs
            .insert("next_offset".to_string(), json!(next_offset));
        outcome.outputs.insert("page_size".to_string(), json!(page_size));
        Ok(outcome)
    }
}

/// This worker's registry capability.
pub fn capability() -> plan_core::WorkerCapability {
    plan_core::WorkerCapability {
        name: "page_query".to_string(),
        description: "Continues a remembered search from its last page cursor.".to_string(),
        preconditions: vec![
            "requires `prior_es_query`/`prior_next_offset`/`prior_page_size` context slots"
                .to_string(),
        ],
        outputs: vec![
            "formatted_results".to_string(),
            "es_query".to_string(),
            "next_offset".to_string(),
            "page_size".to_string(),
        ],
        goal_type: GoalType::Deliverable,
        memorable_slots: vec![
            "es_query".to_string(),
            "next_offset".to_string(),
            "page_size".to_string(),
        ],
        synthesis_mode: SynthesisMode::Display,
    }
}
