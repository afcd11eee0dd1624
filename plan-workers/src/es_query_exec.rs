//! `es_query_exec` — runs a generated query against the `DataService` and
//! reports the first page plus a pagination cursor (spec.md §8 S2/S3).

use async_trait::async_trait;
use plan_core::{DataService, GoalType, WorkerError, WorkerInput, WorkerOutcome};
use serde_json::json;
use std::sync::Arc;

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Worker body for `es_query_exec`.
pub struct EsQueryExec {
    data_service: Arc<dyn DataService>,
}

impl EsQueryExec {
    /// Build a new `es_query_exec` worker over the given data-service
    /// collaborator.
    pub fn new(data_service: Arc<dyn DataService>) -> Self {
        Self { data_service }
    }
}

#[async_trait]
impl plan_core::Worker for EsQueryExec {
    fn name(&self) -> &str {
        "es_query_exec"
    }

    async fn call(&self, input: WorkerInput) -> Result<WorkerOutcome, WorkerError> {
        let query = input
            .resolved_inputs
            .get("es_query")
            .cloned()
            .unwrap_or_else(|| json!({}));
        let page_size = input
            .sub_goal
            .params
            .get("page_size")
            .and_then(|v| v.as_u64())
            .map(|v| v as u32)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let response = self
            .data_service
            .paginate(query, page_size, 0)
            .await
            .map_err(|err| WorkerError::Failed(err.to_string()))?;

        let hit_count = response.hits.total.value;
        let next_offset = u64::from(page_size);
        let has_more = next_offset < hit_count;
        let formatted_results = format!("{hit_count} result(s) found.");

        let mut outcome = WorkerOutcome::default();
        outcome
            .outputs
            .insert("formatted_results".to_string(), json!(formatted_results));
        outcome.outputs.insert("hit_count".to_string(), json!(hit_count));
        outcome.outputs.insert("has_more".to_string(), json!(has_more));
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
        name: "es_query_exec".to_string(),
        description: "Executes a search query and returns the first page of results.".to_string(),
        preconditions: vec!["requires an `es_query` input from `es_query_gen`".to_string()],
        outputs: vec![
            "formatted_results".to_string(),
            "hit_count".to_string(),
            "has_more".to_string(),
            "next_offset".to_string(),
            "page_size".to_string(),
        ],
        goal_type: GoalType::Support,
        memorable_slots: vec!["next_offset".to_string(), "page_size".to_string()],
        synthesis_mode: Default::default(),
    }
}
