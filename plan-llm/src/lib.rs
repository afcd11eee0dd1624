//! # plan-llm — the LLM collaborator boundary
//!
//! `LlmClient`, its wire types, and (behind `test-utils`) a queued test
//! double, shared by the Normalizer, Planner, and Synthesizer.
#![deny(missing_docs)]

mod client;
mod error;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use client::{LlmClient, LlmRequest, LlmResponse, ResponseFormat, TokenUsage};
pub use error::LlmError;
