//! # plan-join — C7 Join/Reduce
//!
//! Merges a round's worker results into `PlanState`, advances the round
//! counter, and derives cross-turn `KeyArtifact`s (spec.md §4.7, §4.7.1).
#![deny(missing_docs)]

mod artifact;
mod join;

pub use artifact::apply_artifacts;
pub use join::JoinReduce;
