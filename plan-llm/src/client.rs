//! Wire types and the `LlmClient` trait (spec.md §6: "LLM collaborator").
//!
//! Simplified relative to `neuron-turn::types`: the planner never needs
//! multi-turn tool-call conversations or provider-native extras, just a
//! system/user prompt in and a text response out. Structured decisions
//! (the Planner's round decision, see spec.md §4.4) are plain JSON text
//! that the caller parses — `LlmClient` itself stays format-agnostic.

use crate::error::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Whether the caller expects free text or a JSON document back.
///
/// Advisory only: `LlmClient` impls may use it to select a JSON-mode API
/// parameter, but `LlmClient::complete` always returns a plain string: the
/// caller owns parsing (spec.md §4.3, §4.4, §4.8 each parse differently).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free-form natural language is expected.
    Text,
    /// A single JSON document is expected.
    Json,
}

/// A request to the LLM collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    /// System / instruction prompt.
    pub system: Option<String>,
    /// The user-facing prompt content.
    pub prompt: String,
    /// Hint for how the response should be shaped.
    pub response_format: ResponseFormat,
}

impl LlmRequest {
    /// A free-text request with no system prompt.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            response_format: ResponseFormat::Text,
        }
    }

    /// A JSON-mode request with no system prompt.
    pub fn json(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            response_format: ResponseFormat::Json,
        }
    }

    /// Attach a system prompt.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Token usage for one collaborator call, for telemetry (spec.md §11).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Input tokens consumed.
    pub input_tokens: u64,
    /// Output tokens generated.
    pub output_tokens: u64,
}

/// Response from the LLM collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// The raw text of the response. If `response_format` was `Json`, this
    /// is expected to parse as a single JSON document.
    pub text: String,
    /// Token usage, when the backend reports it.
    #[serde(default)]
    pub usage: TokenUsage,
}

impl LlmResponse {
    /// A response with no usage information (for test doubles).
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: TokenUsage::default(),
        }
    }
}

/// The LLM collaborator boundary (spec.md §6).
///
/// Object-safe by design: shared as `Arc<dyn LlmClient>` across the
/// Normalizer, Planner, and Synthesizer, which never share a generic type
/// parameter the way a single `NeuronTurn<P: Provider>` does.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one request, returning the raw text response.
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;
}
