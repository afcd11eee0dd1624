//! # plan — facade crate
//!
//! A single entry point, `PlanRuntime::run_turn`, wiring the Normalizer,
//! Planner, Dispatch Router, Join/Reduce, and Synthesizer into one
//! conversational turn (spec.md §5, §6). Analog of the teacher's `neuron`
//! umbrella crate.
#![deny(missing_docs)]

mod driver;

pub use driver::{PlanRuntime, TurnOutcome};

/// Happy-path imports for running turns and building a worker registry.
pub mod prelude {
    pub use crate::{PlanRuntime, TurnOutcome};
    pub use plan_core::{
        DataService, GoalType, InputRef, KeyArtifact, PlanState, SubGoal, SubGoalStatus,
        SynthesisMode, TurnId, TurnStatus, TurnSummary, Worker, WorkerCapability, WorkerRegistry,
    };
    pub use plan_llm::{LlmClient, LlmRequest, LlmResponse};
}
