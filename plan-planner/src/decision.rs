//! The typed decision record the LLM collaborator returns each round
//! (spec.md §4.4: "The *shape* of the response is fixed ... the *content*
//! is the collaborator's concern").

use plan_core::{GoalType, InputRef};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One sub-goal the planner proposes this round. `id` and `outputs` are not
/// part of the LLM's response — they're assigned by the planner once the
/// proposal is accepted (spec.md §3: `id` is "monotonically increasing...
/// unique within a turn"; `outputs` is "copied from the registry").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedSubGoal {
    /// Name of a registered capability.
    pub worker: String,
    /// Human-readable instruction.
    pub description: String,
    /// Local input name → dependency pointer.
    #[serde(default)]
    pub inputs: HashMap<String, InputRef>,
    /// Static parameters, no dependency resolution.
    #[serde(default)]
    pub params: HashMap<String, serde_json::Value>,
    /// Support or deliverable.
    pub goal_type: GoalType,
}

/// The planner's choice for this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Propose more sub-goals and keep executing.
    Continue,
    /// Declare the turn complete; `synthesis_inputs` selects the answer.
    Done,
    /// Declare the turn unrecoverable.
    Failed,
}

/// The full typed decision record (spec.md §4.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningDecision {
    /// `continue` | `done` | `failed`.
    pub decision: Decision,
    /// New sub-goals to create this round (only meaningful for `continue`).
    #[serde(default)]
    pub sub_goals: Vec<ProposedSubGoal>,
    /// Deliverable slot selection for synthesis (only meaningful for `done`).
    #[serde(default)]
    pub synthesis_inputs: Option<HashMap<String, InputRef>>,
    /// The collaborator's short rationale for this round's choice.
    #[serde(default)]
    pub reasoning: String,
    /// Populated when `decision = failed`: a human-readable reason.
    #[serde(default)]
    pub failure_reason: Option<String>,
}
