//! `run_turn` — wires C3-C8 into one conversational turn (spec.md §5, §6).

use plan_core::{KeyArtifact, PlanState, TurnId, TurnStatus, TurnSummary, WorkerRegistry};
use plan_llm::LlmClient;
use plan_normalize::Normalizer;
use plan_orch_local::DispatchRouter;
use plan_planner::Planner;
use plan_synth::Synthesizer;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// What one completed (or cancelled/failed) turn produced.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The synthesized answer, or the fixed fallback message if the turn
    /// never reached synthesis.
    pub final_response: String,
    /// Artifacts accumulated this turn, to be folded into the next
    /// `TurnSummary` for conversational memory.
    pub new_artifacts: Vec<KeyArtifact>,
    /// How the turn ended.
    pub status: TurnStatus,
}

const NOTHING_TO_SAY: &str = "I wasn't able to complete your request.";

/// Wires one instance each of the Normalizer, Planner, Dispatch Router,
/// Join/Reduce, and Synthesizer over a shared LLM collaborator and worker
/// registry — the facade's single entry point (spec.md §6).
pub struct PlanRuntime {
    normalizer: Normalizer,
    planner: Planner,
    router: DispatchRouter,
    join: plan_join::JoinReduce,
    synthesizer: Synthesizer,
}

impl PlanRuntime {
    /// Build a runtime over the given LLM collaborator and worker registry.
    pub fn new(llm: Arc<dyn LlmClient>, registry: Arc<WorkerRegistry>) -> Self {
        Self {
            normalizer: Normalizer::new(Arc::clone(&llm)),
            planner: Planner::new(Arc::clone(&llm), Arc::clone(&registry)),
            router: DispatchRouter::new(Arc::clone(&registry)),
            join: plan_join::JoinReduce::new(Arc::clone(&registry)),
            synthesizer: Synthesizer::new(llm, registry),
        }
    }

    /// Run one conversational turn to completion: normalize, then loop
    /// planning rounds and dispatch/join until the Planner reports `Done`
    /// or `Failed`, then synthesize the final answer.
    ///
    /// `cancel` is checked at both suspension points this core has (the
    /// planning LLM call, the parallel worker dispatch) — cancellation
    /// discards partial results for the round in flight rather than
    /// attempting to salvage them (spec.md §5).
    pub async fn run_turn(
        &self,
        question: &str,
        history: &[TurnSummary],
        max_rounds: u32,
        turn_id: TurnId,
        cancel: &CancellationToken,
    ) -> TurnOutcome {
        let normalized = self.normalizer.normalize(question, history).await;
        let mut state = PlanState::new(question, history.to_vec(), max_rounds);
        state.question = normalized.question;
        state.planner_reasoning = normalized.planner_reasoning;
        state
            .completed_outputs
            .insert(0, normalized.context_slots);

        loop {
            let plan_result = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::warn!("turn cancelled during planning");
                    state.status = TurnStatus::Failed;
                    state.planner_reasoning = "turn cancelled during planning".to_string();
                    break;
                }
                result = self.planner.plan_round(&mut state) => result,
            };
            if let Err(err) = plan_result {
                tracing::warn!(error = %err, "planning round failed");
            }
            if matches!(state.status, TurnStatus::Done | TurnStatus::Failed) {
                break;
            }

            let results = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::warn!("turn cancelled during dispatch");
                    state.status = TurnStatus::Failed;
                    state.planner_reasoning = "turn cancelled during dispatch".to_string();
                    break;
                }
                results = self.router.dispatch_round(&state) => results,
            };
            state.worker_results = results;
            self.join.join(&mut state, turn_id);
        }

        if state.status != TurnStatus::Failed {
            if let Err(err) = self.synthesizer.synthesize(&mut state).await {
                tracing::warn!(error = %err, "synthesis failed");
                state.status = TurnStatus::Failed;
                state.planner_reasoning = err.to_string();
            }
        }

        TurnOutcome {
            final_response: state
                .final_response
                .unwrap_or_else(|| NOTHING_TO_SAY.to_string()),
            new_artifacts: state.key_artifacts,
            status: state.status,
        }
    }
}
