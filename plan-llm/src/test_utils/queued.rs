//! `QueuedLlmClient` — returns canned responses in order. Used across
//! `plan-normalize`, `plan-planner`, `plan-synth`, and `plan`'s scenario
//! tests (spec.md §8 S1-S6) to drive deterministic LLM collaborator replies
//! without a live backend.

use crate::client::{LlmClient, LlmRequest, LlmResponse};
use crate::error::LlmError;
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// A queue of canned text responses, consumed front-to-back by successive
/// `complete` calls. Errors with `LlmError::Other` if the queue is empty —
/// an empty queue means the test under-provisioned responses for the
/// number of collaborator calls the code under test actually makes.
pub struct QueuedLlmClient {
    responses: Mutex<VecDeque<String>>,
}

impl QueuedLlmClient {
    /// Build a client that replies with `responses` in order.
    pub fn new(responses: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
        }
    }

    /// Number of responses not yet consumed.
    pub async fn remaining(&self) -> usize {
        self.responses.lock().await.len()
    }
}

#[async_trait]
impl LlmClient for QueuedLlmClient {
    async fn complete(&self, _request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let mut queue = self.responses.lock().await;
        match queue.pop_front() {
            Some(text) => Ok(LlmResponse::text(text)),
            None => Err(LlmError::Other(
                "QueuedLlmClient exhausted: no canned response left".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_in_order_then_errors() {
        let client = QueuedLlmClient::new(["first", "second"]);
        assert_eq!(
            client.complete(LlmRequest::text("q")).await.unwrap().text,
            "first"
        );
        assert_eq!(client.remaining().await, 1);
        assert_eq!(
            client.complete(LlmRequest::text("q")).await.unwrap().text,
            "second"
        );
        assert!(client.complete(LlmRequest::text("q")).await.is_err());
    }
}
