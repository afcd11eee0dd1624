//! # plan-core — protocol traits and data model
//!
//! The inert foundation of the deterministic graph-based task planner: the
//! state graph's data model (`SubGoal`, `InputRef`, `PlanState`,
//! `KeyArtifact`), the `Worker` and `DataService` protocol boundaries, the
//! worker registry, and the `worker_results` reducer contract.
//!
//! Modeled on `layer0` from the teacher corpus: one crate, several small
//! protocol traits, no I/O of its own.
#![deny(missing_docs)]

pub mod dataservice;
pub mod error;
pub mod id;
pub mod model;
pub mod plan_state;
pub mod reducer;
pub mod registry;
pub mod validate;
pub mod worker;

pub use dataservice::{AggregationResponse, DataService, Hits, HitsTotal, SearchResponse};
pub use error::{
    DataServiceError, InputRefError, NormalizeError, PlanError, RegistryError, RoutingError,
    SynthesisError, WorkerError,
};
pub use id::{SubGoalId, TurnId};
pub use model::{
    GoalType, InputRef, SubGoal, SubGoalStatus, SynthesisMode, WorkerCapability, WorkerInput,
    WorkerResult,
};
pub use plan_state::{ArtifactKind, KeyArtifact, PlanState, TurnStatus, TurnSummary};
pub use reducer::{merge_worker_results, WorkerResultsSink};
pub use registry::WorkerRegistry;
pub use validate::{slot_set_for_source, validate_input_ref};
pub use worker::{Worker, WorkerOutcome};
