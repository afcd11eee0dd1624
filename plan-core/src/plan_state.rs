//! Per-turn plan state and cross-turn conversational memory (spec.md §3).

use crate::id::{SubGoalId, TurnId};
use crate::model::{InputRef, SubGoal};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Overall lifecycle status of a turn (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnStatus {
    /// Planner is deciding what to do next.
    Planning,
    /// Sub-goals have been dispatched or are pending dispatch this round.
    Executing,
    /// The Synthesizer has produced `final_response`.
    Done,
    /// The turn ended without an answer (budget exhausted, planning error).
    Failed,
}

/// A cross-turn memory record: one completed turn (spec.md §3, §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnSummary {
    /// Id of the completed turn.
    pub turn_id: TurnId,
    /// The raw utterance the human sent.
    pub human_message: String,
    /// The synthesized final response.
    pub ai_response: String,
    /// Artifacts this turn produced, carried forward for later turns.
    #[serde(default)]
    pub key_artifacts: Vec<KeyArtifact>,
}

/// The recognized `KeyArtifact` payload shapes (spec.md §3, §6).
///
/// `Other` is the forward-compatible escape hatch spec.md describes as
/// "a forward-compatible string tag" for additional types — the same
/// pattern as `layer0::effect::Effect`'s non-exhaustive tagged union.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// A persisted search query plus pagination cursor.
    EsQuery,
    /// An entity-resolution / intent-classification record.
    AnalysisResult,
    /// Forward-compatible tag for artifact types this core doesn't define.
    Other(String),
}

/// A cross-turn memory record emitted from a worker's `memorable_slots`
/// (spec.md §3, §6, GLOSSARY).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyArtifact {
    /// The artifact's type tag.
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    /// The sub-goal that produced this artifact.
    pub sub_goal_id: SubGoalId,
    /// The turn this artifact was produced in.
    pub turn_id: TurnId,
    /// Short human-readable description of intent (for prompt economy).
    pub intent: String,
    /// The artifact's payload slots.
    pub slots: HashMap<String, serde_json::Value>,
}

impl KeyArtifact {
    /// Construct a new artifact with an empty slot map.
    pub fn new(
        kind: ArtifactKind,
        sub_goal_id: SubGoalId,
        turn_id: TurnId,
        intent: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            sub_goal_id,
            turn_id,
            intent: intent.into(),
            slots: HashMap::new(),
        }
    }

    /// Merge another slot map into this artifact, overwriting on conflict.
    /// Used for query-execution bundling into a query-generation artifact
    /// (spec.md §4.7.1).
    pub fn merge_slots(&mut self, extra: HashMap<String, serde_json::Value>) {
        self.slots.extend(extra);
    }
}

/// Per-turn plan state (spec.md §3). Mutated only by the components of
/// spec.md §4; discarded once the Synthesizer completes.
#[derive(Debug, Clone)]
pub struct PlanState {
    /// The raw utterance as received from the driver.
    pub original_question: String,
    /// The normalized actionable goal.
    pub question: String,
    /// Prior turns, most-recent-last.
    pub conversation_history: Vec<TurnSummary>,
    /// All sub-goals created so far this turn, in creation order.
    pub sub_goals: Vec<SubGoal>,
    /// `0` reserved for the normalizer's context slots; `1..N` for
    /// successful sub-goal outputs.
    pub completed_outputs: HashMap<u64, HashMap<String, serde_json::Value>>,
    /// 1-indexed round counter.
    pub round: u32,
    /// Safety cap on rounds.
    pub max_rounds: u32,
    /// Overall lifecycle status.
    pub status: TurnStatus,
    /// Populated by the Synthesizer.
    pub final_response: Option<String>,
    /// Short trace line, updated by every core component.
    pub planner_reasoning: String,
    /// Planner-specified deliverable slots for synthesis, set on `done`.
    pub synthesis_inputs: Option<HashMap<String, InputRef>>,
    /// Mergeable accumulator drained by Join/Reduce (spec.md §4.1, §5).
    pub worker_results: Vec<crate::model::WorkerResult>,
    /// Artifacts built so far this turn (spec.md §4.7.1: bundling may
    /// reference "this round or a prior one", so the list accumulates
    /// across rounds rather than resetting each Join/Reduce pass).
    pub key_artifacts: Vec<KeyArtifact>,
}

impl PlanState {
    /// Construct the initial state for a new turn, before normalization.
    pub fn new(
        original_question: impl Into<String>,
        conversation_history: Vec<TurnSummary>,
        max_rounds: u32,
    ) -> Self {
        let original_question = original_question.into();
        Self {
            question: original_question.clone(),
            original_question,
            conversation_history,
            sub_goals: Vec::new(),
            completed_outputs: HashMap::new(),
            round: 1,
            max_rounds,
            status: TurnStatus::Planning,
            final_response: None,
            planner_reasoning: String::new(),
            synthesis_inputs: None,
            worker_results: Vec::new(),
            key_artifacts: Vec::new(),
        }
    }

    /// The ids of all sub-goals created so far (`existingSubGoalIds` in
    /// spec.md §4.4 rule 4).
    pub fn existing_sub_goal_ids(&self) -> Vec<SubGoalId> {
        self.sub_goals.iter().map(|sg| sg.id).collect()
    }

    /// The next id to assign to a newly created sub-goal.
    pub fn next_sub_goal_id(&self) -> SubGoalId {
        self.sub_goals
            .iter()
            .map(|sg| sg.id)
            .max()
            .map(SubGoalId::next)
            .unwrap_or(SubGoalId(1))
    }

    /// Look up a sub-goal by id.
    pub fn sub_goal(&self, id: SubGoalId) -> Option<&SubGoal> {
        self.sub_goals.iter().find(|sg| sg.id == id)
    }

    /// Look up a sub-goal mutably by id.
    pub fn sub_goal_mut(&mut self, id: SubGoalId) -> Option<&mut SubGoal> {
        self.sub_goals.iter_mut().find(|sg| sg.id == id)
    }
}
