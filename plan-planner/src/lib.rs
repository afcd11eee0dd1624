//! # plan-planner — C4, the per-round planning decision engine
//!
//! Enforces the round budget, empty-question, no-op, InputRef-validation,
//! slot-0, pending-awareness, and done-path rules of spec.md §4.4.
#![deny(missing_docs)]

mod decision;
mod planner;
mod prompt;

pub use decision::{Decision, PlanningDecision, ProposedSubGoal};
pub use planner::Planner;
pub use prompt::build_planning_prompt;
