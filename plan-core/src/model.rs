//! Core data model (spec.md §3): `InputRef`, `SubGoal`, `WorkerInput`,
//! `WorkerResult`, `WorkerCapability`.

use crate::id::SubGoalId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A dependency pointer: "read `slot` from the completed outputs of
/// `from_sub_goal`." Value semantics; never owns memory (spec.md §3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRef {
    /// The sub-goal whose completed output this reads.
    pub from_sub_goal: SubGoalId,
    /// The slot name within that sub-goal's output (or `completed_outputs` entry).
    pub slot: String,
}

impl InputRef {
    /// Construct a new `InputRef`.
    pub fn new(from_sub_goal: impl Into<SubGoalId>, slot: impl Into<String>) -> Self {
        Self {
            from_sub_goal: from_sub_goal.into(),
            slot: slot.into(),
        }
    }
}

/// Whether a sub-goal may contribute to the final synthesized answer
/// (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// Contributes to other sub-goals but is never selected by the
    /// Synthesizer on its own.
    Support,
    /// May be selected by the Synthesizer as a source of the final answer.
    Deliverable,
}

/// Lifecycle status of a sub-goal (spec.md §3).
///
/// Invariant: once a status leaves `Pending`, it never returns to
/// `Pending` — there is deliberately no `From`/mutation path back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubGoalStatus {
    /// Created, not yet dispatched (dependencies not yet all resolved).
    Pending,
    /// The worker ran and reported success.
    Success,
    /// The worker ran and reported failure, or was never dispatched due to
    /// an `InputRefError` / `RoutingError`.
    Failed,
}

/// The unit of planned work, bound to one registered worker (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubGoal {
    /// Monotonically increasing id, unique within the turn. `0` is reserved.
    pub id: SubGoalId,
    /// Name of a registered capability.
    pub worker: String,
    /// Human-readable instruction; also the worker's natural-language input.
    pub description: String,
    /// Local input name → dependency pointer.
    pub inputs: HashMap<String, InputRef>,
    /// Static, planner-supplied parameters. No dependency resolution.
    #[serde(default)]
    pub params: HashMap<String, serde_json::Value>,
    /// Declared output slot names, copied from the registry at creation time.
    pub outputs: Vec<String>,
    /// Support or deliverable.
    pub goal_type: GoalType,
    /// Current lifecycle status.
    pub status: SubGoalStatus,
    /// Populated on success: produced slot → value.
    #[serde(default)]
    pub result: Option<HashMap<String, serde_json::Value>>,
    /// Populated on failure: short diagnostic string.
    #[serde(default)]
    pub error: Option<String>,
}

impl SubGoal {
    /// Construct a new, still-`Pending` sub-goal.
    pub fn new(
        id: SubGoalId,
        worker: impl Into<String>,
        description: impl Into<String>,
        goal_type: GoalType,
        outputs: Vec<String>,
    ) -> Self {
        Self {
            id,
            worker: worker.into(),
            description: description.into(),
            inputs: HashMap::new(),
            params: HashMap::new(),
            outputs,
            goal_type,
            status: SubGoalStatus::Pending,
            result: None,
            error: None,
        }
    }

    /// Mark this sub-goal as pre-failed due to an `InputRefError`, without
    /// ever dispatching a worker for it (spec.md §4.4 rule 4, §7).
    pub fn fail_input_ref(&mut self, err: &crate::error::InputRefError) {
        self.status = SubGoalStatus::Failed;
        self.error = Some(err.to_string());
    }
}

/// Delivered to a worker: the sub-goal plus its hydrated inputs
/// (spec.md §3).
#[derive(Debug, Clone)]
pub struct WorkerInput {
    /// The sub-goal being executed.
    pub sub_goal: SubGoal,
    /// Local input name → resolved value. One entry per declared `InputRef`.
    pub resolved_inputs: HashMap<String, serde_json::Value>,
}

/// Uniform result record produced by the executor for every sub-goal
/// dispatch (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerResult {
    /// The sub-goal this result is for. Preserved even on routing failure.
    pub sub_goal_id: SubGoalId,
    /// The resulting status: `Success` or `Failed` (never `Pending`).
    pub status: SubGoalStatus,
    /// Slots the worker produced. Written verbatim into `completed_outputs`.
    #[serde(default)]
    pub outputs: HashMap<String, serde_json::Value>,
    /// Short diagnostic string, populated when `status = Failed`.
    #[serde(default)]
    pub error: Option<String>,
    /// Optional human-readable message (e.g. for logging/synthesis hints).
    #[serde(default)]
    pub message: Option<String>,
}

impl WorkerResult {
    /// A successful result.
    pub fn success(
        sub_goal_id: SubGoalId,
        outputs: HashMap<String, serde_json::Value>,
        message: Option<String>,
    ) -> Self {
        Self {
            sub_goal_id,
            status: SubGoalStatus::Success,
            outputs,
            error: None,
            message,
        }
    }

    /// A failed result. `outputs` is empty — a failed worker contributes
    /// nothing to `completed_outputs`.
    pub fn failed(sub_goal_id: SubGoalId, error: impl Into<String>) -> Self {
        Self {
            sub_goal_id,
            status: SubGoalStatus::Failed,
            outputs: HashMap::new(),
            error: Some(error.into()),
            message: None,
        }
    }
}

/// Controls how a worker's output is folded into the final answer
/// (spec.md §3, §4.8, GLOSSARY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisMode {
    /// Woven into the narrative answer via an LLM summarization pass.
    Narrative,
    /// Appended verbatim after the narrative.
    Display,
    /// Withheld from the final answer entirely.
    #[default]
    Hidden,
}

/// A registry entry describing one capability (spec.md §3, §4.2, §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerCapability {
    /// Unique name, used as the registry key and `SubGoal::worker` value.
    pub name: String,
    /// Human-readable description, shown to the Planner's LLM collaborator.
    pub description: String,
    /// Free-form precondition hints surfaced to the Planner's collaborator.
    #[serde(default)]
    pub preconditions: Vec<String>,
    /// Output slot names this worker may produce.
    pub outputs: Vec<String>,
    /// Support or deliverable.
    pub goal_type: GoalType,
    /// Slot names from which Join/Reduce derives cross-turn `KeyArtifact`s.
    #[serde(default)]
    pub memorable_slots: Vec<String>,
    /// How the Synthesizer should treat this worker's output.
    #[serde(default)]
    pub synthesis_mode: SynthesisMode,
}
