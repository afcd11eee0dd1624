//! Error taxonomy, one enum per protocol boundary (spec.md §7).
//!
//! Mirrors `layer0::error`'s shape: `#[non_exhaustive]`, `thiserror`-derived,
//! each with a catch-all `Other` variant for forward compatibility.

use thiserror::Error;

/// Errors from normalizing a raw utterance into a goal (spec.md §4.3, §7).
///
/// Recovered locally — the normalizer never propagates these past itself.
/// It falls back to the raw utterance and records the message in
/// `planner_reasoning`.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The LLM collaborator failed to produce a normalized goal.
    #[error("normalization failed: {0}")]
    LlmFailed(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors from a planning round (spec.md §4.4, §7).
///
/// `PlanningError` is fatal — it ends the whole turn with `status = failed`.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PlanError {
    /// `round > max_rounds`.
    #[error("round budget exhausted: round {round} exceeds max_rounds {max_rounds}")]
    BudgetExhausted {
        /// The round that was about to start.
        round: u32,
        /// The configured budget.
        max_rounds: u32,
    },

    /// `question` was empty when a round began.
    #[error("question is empty")]
    EmptyQuestion,

    /// The planner decided to continue but proposed no sub-goals.
    #[error("planner proposed continue with no sub-goals")]
    NoOpContinue,

    /// The LLM collaborator failed or returned a malformed decision.
    #[error("planning decision failed: {0}")]
    LlmFailed(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// A planner-emitted `InputRef` failed validation (spec.md §4.4 rule 4, §7).
///
/// Recorded on the *individual* sub-goal, not the whole turn.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputRefError {
    /// The referenced `from_sub_goal` id is not a prior sub-goal, a
    /// same-batch sibling, or a key of `completed_outputs`.
    #[error("input `{input_name}` references unknown sub-goal {from}")]
    UnknownSource {
        /// The local input name the sub-goal declared.
        input_name: String,
        /// The referenced sub-goal id.
        from: u64,
    },

    /// The referenced source exists but does not declare the requested slot.
    #[error("input `{input_name}` references undeclared slot `{slot}` on sub-goal {from}")]
    UnknownSlot {
        /// The local input name the sub-goal declared.
        input_name: String,
        /// The referenced sub-goal id.
        from: u64,
        /// The requested slot name.
        slot: String,
    },
}

/// A worker body raised or returned failure (spec.md §4.6, §7).
///
/// Recorded per sub-goal; does not halt the turn.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The worker body returned a domain-level failure.
    #[error("worker failed: {0}")]
    Failed(String),

    /// Catch-all for unexpected panics/errors surfaced through the executor.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Dispatch-time routing failures (spec.md §4.6, §7): empty or unknown
/// worker name. Fatal for that sub-goal only, never for the whole turn.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// `sub_goal.worker` was an empty string.
    #[error("sub-goal {0} has an empty worker name")]
    EmptyWorkerName(u64),

    /// `sub_goal.worker` did not match any registered capability.
    #[error("sub-goal {sub_goal_id} references unknown worker `{worker}`")]
    UnknownWorker {
        /// The sub-goal that referenced the worker.
        sub_goal_id: u64,
        /// The unregistered worker name.
        worker: String,
    },
}

/// Errors from the two-phase synthesis assembly (spec.md §4.8).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The LLM collaborator failed to produce the narrative summary.
    #[error("narrative synthesis failed: {0}")]
    LlmFailed(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors from the data-service collaborator (spec.md §6).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DataServiceError {
    /// The request to the backend failed.
    #[error("data service request failed: {0}")]
    RequestFailed(String),

    /// The backend's response could not be parsed into the expected shape.
    #[error("invalid data service response: {0}")]
    InvalidResponse(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors from registering worker capabilities (spec.md §4.2, §9 redesign).
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A capability with this name was already registered.
    ///
    /// spec.md §9 flags the original's idempotent-duplicate behavior as a
    /// possibly-buggy ambiguity and asks a systems reimplementation to
    /// "forbid silent duplicates (treat a duplicate as a startup error)"
    /// instead. This variant is that redesigned behavior.
    #[error("worker `{0}` is already registered")]
    DuplicateWorker(String),
}
