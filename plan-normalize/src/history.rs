//! Conversation history formatting and cross-turn artifact lookup
//! (spec.md §4.3, §6 "KeyArtifact wire shape", §8 property 7).

use plan_core::{ArtifactKind, KeyArtifact, TurnSummary};

/// Only the last 5 turns are formatted into the LLM prompt; earlier turns
/// are elided (spec.md §4.3).
const RECENT_TURNS: usize = 5;

/// Render the most recent turns into a compact transcript, eliding anything
/// past the last [`RECENT_TURNS`].
pub fn format_recent_history(history: &[TurnSummary]) -> String {
    if history.is_empty() {
        return String::new();
    }
    let elided = history.len().saturating_sub(RECENT_TURNS);
    let recent = &history[elided..];
    let mut out = String::new();
    if elided > 0 {
        out.push_str(&format!("[{elided} earlier turn(s) elided]\n"));
    }
    for turn in recent {
        out.push_str(&format!(
            "user: {}\nassistant: {}\n",
            turn.human_message, turn.ai_response
        ));
    }
    out
}

/// Scan history most-recent-first for the first `es_query` artifact
/// (spec.md §6: "Consumers scan history most-recent-first and treat the
/// first matching-type artifact as authoritative").
pub fn most_recent_es_query_artifact(history: &[TurnSummary]) -> Option<&KeyArtifact> {
    history
        .iter()
        .rev()
        .flat_map(|turn| turn.key_artifacts.iter())
        .find(|artifact| matches!(artifact.kind, ArtifactKind::EsQuery))
}
