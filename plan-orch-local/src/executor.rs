//! C6: Worker Executor (spec.md §4.6).
//!
//! Three failure modes produce a `failed` `WorkerResult` without invoking
//! the worker body: empty worker name, unknown worker name, and (handled
//! one layer up in `router`) a panic inside the worker body. The original
//! `sub_goal.id` is preserved in every case.

use plan_core::{RoutingError, WorkerInput, WorkerRegistry, WorkerResult};

/// Run one hydrated `WorkerInput` to completion.
pub async fn execute_one(registry: &WorkerRegistry, input: WorkerInput) -> WorkerResult {
    let sub_goal_id = input.sub_goal.id;

    if input.sub_goal.worker.is_empty() {
        let err = RoutingError::EmptyWorkerName(sub_goal_id.value());
        tracing::warn!(sub_goal_id = sub_goal_id.value(), "empty worker name");
        return WorkerResult::failed(sub_goal_id, err.to_string());
    }

    let worker = match registry.worker(&input.sub_goal.worker) {
        Some(worker) => worker,
        None => {
            let err = RoutingError::UnknownWorker {
                sub_goal_id: sub_goal_id.value(),
                worker: input.sub_goal.worker.clone(),
            };
            tracing::warn!(sub_goal_id = sub_goal_id.value(), worker = %input.sub_goal.worker, "unknown worker");
            return WorkerResult::failed(sub_goal_id, err.to_string());
        }
    };

    match worker.call(input).await {
        Ok(outcome) => WorkerResult::success(sub_goal_id, outcome.outputs, outcome.message),
        Err(err) => {
            tracing::warn!(sub_goal_id = sub_goal_id.value(), error = %err, "worker body failed");
            WorkerResult::failed(sub_goal_id, err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use plan_core::{GoalType, SubGoal, SubGoalId, WorkerError, WorkerOutcome};
    use std::collections::HashMap;
    use std::sync::Arc;

    struct Boom;

    #[async_trait]
    impl plan_core::Worker for Boom {
        fn name(&self) -> &str {
            "boom"
        }
        async fn call(&self, _input: WorkerInput) -> Result<WorkerOutcome, WorkerError> {
            Err(WorkerError::Failed("kaboom".to_string()))
        }
    }

    fn sub_goal(id: u64, worker: &str) -> SubGoal {
        SubGoal::new(SubGoalId(id), worker, "desc", GoalType::Support, vec![])
    }

    #[tokio::test]
    async fn empty_worker_name_fails_without_lookup() {
        let registry = WorkerRegistry::new();
        let input = WorkerInput {
            sub_goal: sub_goal(1, ""),
            resolved_inputs: HashMap::new(),
        };
        let result = execute_one(&registry, input).await;
        assert_eq!(result.sub_goal_id, SubGoalId(1));
        assert!(result.error.unwrap().contains("empty worker name"));
    }

    #[tokio::test]
    async fn unknown_worker_name_fails() {
        let registry = WorkerRegistry::new();
        let input = WorkerInput {
            sub_goal: sub_goal(1, "nonexistent"),
            resolved_inputs: HashMap::new(),
        };
        let result = execute_one(&registry, input).await;
        assert!(result.error.unwrap().contains("unknown worker"));
    }

    #[tokio::test]
    async fn worker_failure_preserves_sub_goal_id() {
        let mut registry = WorkerRegistry::new();
        registry
            .register(
                plan_core::WorkerCapability {
                    name: "boom".to_string(),
                    description: "always fails".to_string(),
                    preconditions: vec![],
                    outputs: vec![],
                    goal_type: GoalType::Support,
                    memorable_slots: vec![],
                    synthesis_mode: Default::default(),
                },
                Arc::new(Boom),
            )
            .unwrap();
        let input = WorkerInput {
            sub_goal: sub_goal(7, "boom"),
            resolved_inputs: HashMap::new(),
        };
        let result = execute_one(&registry, input).await;
        assert_eq!(result.sub_goal_id, SubGoalId(7));
        assert_eq!(result.error.unwrap(), "worker failed: kaboom");
    }
}
