//! Artifact construction (spec.md §4.7.1).
//!
//! Worker categories are distinguished structurally, by which of the
//! recognized memorable slots a result actually produced — not by a fixed
//! worker-name list, since the registry is the only source of truth for
//! what a worker may produce.

use plan_core::{
    ArtifactKind, KeyArtifact, SubGoal, SubGoalId, SubGoalStatus, TurnId, WorkerRegistry,
    WorkerResult,
};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

fn select(outputs: &HashMap<String, Value>, keys: &HashSet<&str>) -> HashMap<String, Value> {
    keys.iter()
        .filter_map(|k| outputs.get(*k).map(|v| (k.to_string(), v.clone())))
        .collect()
}

/// Apply this round's successful results to the turn's running artifact
/// list, in place (spec.md §4.7.1, §8 property 5: order-independent).
pub fn apply_artifacts(
    artifacts: &mut Vec<KeyArtifact>,
    results: &[WorkerResult],
    sub_goals: &[SubGoal],
    completed_outputs: &HashMap<u64, HashMap<String, Value>>,
    registry: &WorkerRegistry,
    turn_id: TurnId,
) {
    for result in results {
        if result.status != SubGoalStatus::Success {
            continue;
        }
        let Some(sub_goal) = sub_goals.iter().find(|sg| sg.id == result.sub_goal_id) else {
            continue;
        };
        let Some(capability) = registry.capability(&sub_goal.worker) else {
            continue;
        };
        if capability.memorable_slots.is_empty() {
            continue;
        }
        let produced: HashSet<&str> = capability
            .memorable_slots
            .iter()
            .filter(|slot| result.outputs.contains_key(slot.as_str()))
            .map(|s| s.as_str())
            .collect();
        if produced.is_empty() {
            continue;
        }

        let has_query = produced.contains("es_query");
        let has_cursor = produced.contains("next_offset") || produced.contains("page_size");
        let has_analysis = produced.contains("analysis_result");

        if has_analysis {
            let mut artifact = KeyArtifact::new(
                ArtifactKind::AnalysisResult,
                sub_goal.id,
                turn_id,
                sub_goal.description.clone(),
            );
            artifact.merge_slots(select(&result.outputs, &produced));
            artifacts.push(artifact);
        } else if has_query {
            // A cursor-bearing result for this same sub-goal may already have
            // been processed (results within a round carry no ordering
            // guarantee) and left a placeholder keyed on this id — merge into
            // it instead of creating a second artifact.
            if let Some(existing) = artifacts
                .iter_mut()
                .find(|a| a.sub_goal_id == sub_goal.id && matches!(a.kind, ArtifactKind::EsQuery))
            {
                existing.merge_slots(select(&result.outputs, &produced));
            } else {
                let mut artifact = KeyArtifact::new(
                    ArtifactKind::EsQuery,
                    sub_goal.id,
                    turn_id,
                    sub_goal.description.clone(),
                );
                artifact.merge_slots(select(&result.outputs, &produced));
                artifacts.push(artifact);
            }
        } else if has_cursor {
            apply_bundled_cursor(artifacts, result, sub_goal, completed_outputs, turn_id, &produced);
        }
    }
}

/// Query-execution worker: bundle pagination slots into the paired
/// query-generation artifact, one-to-many only in that direction (spec.md
/// §4.7.1: "the reverse is not defined").
fn apply_bundled_cursor(
    artifacts: &mut Vec<KeyArtifact>,
    result: &WorkerResult,
    sub_goal: &SubGoal,
    completed_outputs: &HashMap<u64, HashMap<String, Value>>,
    turn_id: TurnId,
    produced: &HashSet<&str>,
) {
    let bundle_target = sub_goal
        .params
        .get("bundles_with_sub_goal")
        .and_then(Value::as_u64);

    if let Some(target) = bundle_target {
        if let Some(existing) = artifacts
            .iter_mut()
            .find(|a| a.sub_goal_id.value() == target && matches!(a.kind, ArtifactKind::EsQuery))
        {
            existing.merge_slots(select(&result.outputs, produced));
            return;
        }
    }

    // No existing placeholder yet: key the new one on the bundle target
    // (not this worker's own id) so a same-round result for the target,
    // processed later, finds it and merges in rather than creating a
    // second artifact.
    let key_id = bundle_target.map(SubGoalId).unwrap_or(sub_goal.id);
    let mut artifact = KeyArtifact::new(ArtifactKind::EsQuery, key_id, turn_id, sub_goal.description.clone());
    if let Some(target) = bundle_target {
        if let Some(query) = completed_outputs.get(&target).and_then(|o| o.get("es_query")) {
            artifact.merge_slots(HashMap::from([("es_query".to_string(), query.clone())]));
        }
    }
    artifact.merge_slots(select(&result.outputs, produced));
    artifacts.push(artifact);
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_core::{GoalType, SubGoalId, WorkerCapability};

    fn capability(name: &str, outputs: &[&str], memorable: &[&str]) -> WorkerCapability {
        WorkerCapability {
            name: name.to_string(),
            description: String::new(),
            preconditions: vec![],
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
            goal_type: GoalType::Support,
            memorable_slots: memorable.iter().map(|s| s.to_string()).collect(),
            synthesis_mode: Default::default(),
        }
    }

    fn registry() -> WorkerRegistry {
        let mut r = WorkerRegistry::new();
        r.register(
            capability("es_query_gen", &["es_query"], &["es_query"]),
            std::sync::Arc::new(NoopWorker),
        )
        .unwrap();
        r.register(
            capability("es_query_exec", &["next_offset", "page_size"], &["next_offset", "page_size"]),
            std::sync::Arc::new(NoopWorker),
        )
        .unwrap();
        r.register(
            capability("metadata_lookup", &["analysis_result"], &["analysis_result"]),
            std::sync::Arc::new(NoopWorker),
        )
        .unwrap();
        r
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

    fn sub_goal(id: u64, worker: &str) -> SubGoal {
        SubGoal::new(SubGoalId(id), worker, "do the thing", GoalType::Support, vec![])
    }

    #[test]
    fn gen_then_exec_bundle_into_one_artifact() {
        let registry = registry();
        let gen_sg = sub_goal(1, "es_query_gen");
        let mut exec_sg = sub_goal(2, "es_query_exec");
        exec_sg
            .params
            .insert("bundles_with_sub_goal".to_string(), serde_json::json!(1));
        let sub_goals = vec![gen_sg, exec_sg];

        let gen_result = WorkerResult::success(
            SubGoalId(1),
            HashMap::from([("es_query".to_string(), serde_json::json!({"term": "maersk"}))]),
            None,
        );
        let exec_result = WorkerResult::success(
            SubGoalId(2),
            HashMap::from([
                ("next_offset".to_string(), serde_json::json!(20)),
                ("page_size".to_string(), serde_json::json!(20)),
            ]),
            None,
        );

        let mut artifacts = Vec::new();
        let completed = HashMap::new();
        apply_artifacts(&mut artifacts, &[gen_result, exec_result], &sub_goals, &completed, &registry, TurnId(1));

        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].slots["next_offset"], serde_json::json!(20));
        assert_eq!(artifacts[0].slots["es_query"], serde_json::json!({"term": "maersk"}));
    }

    #[test]
    fn bundling_is_order_independent() {
        let registry = registry();
        let gen_sg = sub_goal(1, "es_query_gen");
        let mut exec_sg = sub_goal(2, "es_query_exec");
        exec_sg
            .params
            .insert("bundles_with_sub_goal".to_string(), serde_json::json!(1));
        let sub_goals = vec![gen_sg, exec_sg];

        let gen_result = WorkerResult::success(
            SubGoalId(1),
            HashMap::from([("es_query".to_string(), serde_json::json!("q"))]),
            None,
        );
        let exec_result = WorkerResult::success(
            SubGoalId(2),
            HashMap::from([("next_offset".to_string(), serde_json::json!(5))]),
            None,
        );

        let completed = HashMap::new();
        let mut forward = Vec::new();
        apply_artifacts(
            &mut forward,
            &[gen_result.clone(), exec_result.clone()],
            &sub_goals,
            &completed,
            &registry,
            TurnId(1),
        );
        let mut backward = Vec::new();
        apply_artifacts(&mut backward, &[exec_result, gen_result], &sub_goals, &completed, &registry, TurnId(1));

        assert_eq!(forward.len(), backward.len());
        assert_eq!(forward[0].slots, backward[0].slots);
    }

    #[test]
    fn metadata_lookup_emits_analysis_result_artifact() {
        let registry = registry();
        let sg = sub_goal(1, "metadata_lookup");
        let result = WorkerResult::success(
            SubGoalId(1),
            HashMap::from([("analysis_result".to_string(), serde_json::json!({"intent_type": "search"}))]),
            None,
        );
        let mut artifacts = Vec::new();
        apply_artifacts(&mut artifacts, &[result], &[sg], &HashMap::new(), &registry, TurnId(1));
        assert_eq!(artifacts.len(), 1);
        assert!(matches!(artifacts[0].kind, ArtifactKind::AnalysisResult));
    }
}
