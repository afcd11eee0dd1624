//! # plan-synth — C8, the Synthesizer
//!
//! Two-phase narrative+display assembly of the final user-visible answer
//! (spec.md §4.8).
#![deny(missing_docs)]

mod select;
mod synthesizer;

pub use select::{select_inputs, SelectedSlot, PASSTHROUGH_SLOTS};
pub use synthesizer::Synthesizer;
