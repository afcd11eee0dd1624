//! # plan-normalize — C3, the entry normalizer
//!
//! Turns a raw user utterance plus conversation history into a normalized
//! goal and the synthetic `completed_outputs[0]` context slot table.
#![deny(missing_docs)]

mod history;
mod normalizer;
mod slots;

pub use history::{format_recent_history, most_recent_es_query_artifact};
pub use normalizer::{NormalizeOutcome, Normalizer};
pub use slots::build_context_slots;
