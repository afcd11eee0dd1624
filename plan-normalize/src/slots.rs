//! Heuristic extraction of the context slot table (spec.md §4.3, §8
//! property 6, §8 property 7).
//!
//! These are intentionally simple keyword/shape heuristics, not an LLM
//! call — spec.md §1 excludes "the specific prompts" from scope, and the
//! slot table itself is plumbing the core owns directly rather than
//! delegating to the collaborator.

use plan_core::{ArtifactKind, KeyArtifact, TurnSummary};
use serde_json::Value;
use std::collections::HashMap;

use crate::history::most_recent_es_query_artifact;

/// Phrases that signal the user is asking to continue a prior result set
/// (spec.md §4.3 `prior_*` slots, §8 S3).
const CONTINUATION_PHRASES: &[&str] = &[
    "show more",
    "next page",
    "more results",
    "continue",
    "keep going",
    "see more",
];

/// Phrases that signal the user wants to skip clarification (spec.md §4.3
/// `force_execute`).
const FORCE_EXECUTE_PHRASES: &[&str] = &[
    "just run it",
    "don't ask",
    "do not ask",
    "without asking",
    "go ahead",
    "just do it",
];

/// Build the `completed_outputs[0]` context slot table for one utterance
/// (spec.md §4.3, §8 property 6: "slot set is a subset of
/// `{user_es_query, prior_es_query, prior_next_offset, prior_page_size,
/// force_execute}`").
pub fn build_context_slots(
    raw_utterance: &str,
    history: &[TurnSummary],
) -> HashMap<String, Value> {
    let mut slots = HashMap::new();
    let lower = raw_utterance.to_lowercase();

    if let Some(query) = extract_pasted_query(raw_utterance) {
        slots.insert("user_es_query".to_string(), Value::String(query));
    }

    if CONTINUATION_PHRASES.iter().any(|p| lower.contains(p)) {
        if let Some(artifact) = most_recent_es_query_artifact(history) {
            lift_prior_pagination(artifact, &mut slots);
        }
    }

    if FORCE_EXECUTE_PHRASES.iter().any(|p| lower.contains(p)) {
        slots.insert("force_execute".to_string(), Value::Bool(true));
    }

    slots
}

/// A user-pasted query is heuristically anything after an explicit
/// `query:` prefix, or a bare JSON object in the utterance.
fn extract_pasted_query(raw_utterance: &str) -> Option<String> {
    if let Some(rest) = raw_utterance
        .find("query:")
        .map(|idx| raw_utterance[idx + "query:".len()..].trim())
    {
        if !rest.is_empty() {
            return Some(rest.to_string());
        }
    }
    let trimmed = raw_utterance.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Some(trimmed.to_string());
    }
    None
}

fn lift_prior_pagination(artifact: &KeyArtifact, slots: &mut HashMap<String, Value>) {
    debug_assert!(matches!(artifact.kind, ArtifactKind::EsQuery));
    if let Some(q) = artifact.slots.get("es_query") {
        slots.insert("prior_es_query".to_string(), q.clone());
    }
    if let Some(offset) = artifact.slots.get("next_offset") {
        slots.insert("prior_next_offset".to_string(), offset.clone());
    }
    if let Some(size) = artifact.slots.get("page_size") {
        slots.insert("prior_page_size".to_string(), size.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_core::{SubGoalId, TurnId};

    #[test]
    fn no_slots_for_a_plain_question() {
        let slots = build_context_slots("what is a bill of lading?", &[]);
        assert!(slots.is_empty());
    }

    #[test]
    fn force_execute_detected() {
        let slots = build_context_slots("find maersk shipments, just run it", &[]);
        assert_eq!(slots.get("force_execute"), Some(&Value::Bool(true)));
    }

    #[test]
    fn continuation_lifts_prior_pagination() {
        let mut artifact =
            KeyArtifact::new(ArtifactKind::EsQuery, SubGoalId(3), TurnId(1), "search");
        let mut payload = HashMap::new();
        payload.insert("es_query".to_string(), serde_json::json!({"term": "maersk"}));
        payload.insert("next_offset".to_string(), serde_json::json!(20));
        payload.insert("page_size".to_string(), serde_json::json!(20));
        artifact.merge_slots(payload);
        let turn = TurnSummary {
            turn_id: TurnId(1),
            human_message: "find maersk shipments".to_string(),
            ai_response: "here you go".to_string(),
            key_artifacts: vec![artifact],
        };
        let slots = build_context_slots("show more", std::slice::from_ref(&turn));
        assert_eq!(slots["prior_next_offset"], serde_json::json!(20));
        assert_eq!(slots["prior_page_size"], serde_json::json!(20));
        assert!(slots.contains_key("prior_es_query"));
    }

    #[test]
    fn every_slot_key_is_in_the_closed_set() {
        let allowed = [
            "user_es_query",
            "prior_es_query",
            "prior_next_offset",
            "prior_page_size",
            "force_execute",
        ];
        let slots = build_context_slots(
            "query: {\"term\": \"x\"}, just run it",
            &[],
        );
        assert!(slots.keys().all(|k| allowed.contains(&k.as_str())));
    }
}
