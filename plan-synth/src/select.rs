//! Input selection (spec.md §4.8 phase 1).

use plan_core::{GoalType, InputRef, PlanState, SubGoalId, SubGoalStatus};
use serde_json::Value;

/// The closed set of recognized passthrough slot names (spec.md §4.8).
pub const PASSTHROUGH_SLOTS: &[&str] = &[
    "answer",
    "formatted_results",
    "analysis",
    "clarification_message",
    "explanation",
];

/// One selected `(from, slot)` pair with its resolved value.
#[derive(Debug, Clone)]
pub struct SelectedSlot {
    /// The sub-goal that produced this value.
    pub from: SubGoalId,
    /// The slot name within that sub-goal's outputs.
    pub slot: String,
    /// The resolved value.
    pub value: Value,
}

/// Pick the `(from, slot)` pairs that feed synthesis: the planner's
/// `synthesis_inputs` when present and non-empty, otherwise the first
/// passthrough slot from each successful deliverable (spec.md §4.8 phase 1).
pub fn select_inputs(state: &PlanState) -> Vec<SelectedSlot> {
    match state.synthesis_inputs.as_ref().filter(|m| !m.is_empty()) {
        Some(inputs) => inputs
            .values()
            .filter_map(|input_ref| resolve(state, input_ref))
            .collect(),
        None => fallback_passthrough(state),
    }
}

fn resolve(state: &PlanState, input_ref: &InputRef) -> Option<SelectedSlot> {
    let value = state
        .completed_outputs
        .get(&input_ref.from_sub_goal.value())?
        .get(&input_ref.slot)?
        .clone();
    Some(SelectedSlot {
        from: input_ref.from_sub_goal,
        slot: input_ref.slot.clone(),
        value,
    })
}

fn fallback_passthrough(state: &PlanState) -> Vec<SelectedSlot> {
    state
        .sub_goals
        .iter()
        .filter(|sg| sg.goal_type == GoalType::Deliverable && sg.status == SubGoalStatus::Success)
        .filter_map(|sg| {
            let slots = state.completed_outputs.get(&sg.id.value())?;
            let slot_name = PASSTHROUGH_SLOTS.iter().find(|name| slots.contains_key(**name))?;
            Some(SelectedSlot {
                from: sg.id,
                slot: slot_name.to_string(),
                value: slots[*slot_name].clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_core::SubGoal;
    use std::collections::HashMap;

    #[test]
    fn explicit_synthesis_inputs_take_priority() {
        let mut state = PlanState::new("q", vec![], 10);
        state
            .completed_outputs
            .insert(1, HashMap::from([("answer".to_string(), serde_json::json!("hi"))]));
        state.synthesis_inputs = Some(HashMap::from([(
            "a".to_string(),
            InputRef::new(1u64, "answer"),
        )]));
        let selected = select_inputs(&state);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, serde_json::json!("hi"));
    }

    #[test]
    fn fallback_picks_first_passthrough_slot_per_deliverable() {
        let mut state = PlanState::new("q", vec![], 10);
        let mut sg = SubGoal::new(SubGoalId(1), "common_helpdesk", "d", GoalType::Deliverable, vec!["answer".to_string()]);
        sg.status = SubGoalStatus::Success;
        state.sub_goals = vec![sg];
        state
            .completed_outputs
            .insert(1, HashMap::from([("answer".to_string(), serde_json::json!("bill of lading is..."))]));
        let selected = select_inputs(&state);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].slot, "answer");
    }

    #[test]
    fn support_sub_goals_are_never_selected_by_fallback() {
        let mut state = PlanState::new("q", vec![], 10);
        let mut sg = SubGoal::new(SubGoalId(1), "metadata_lookup", "d", GoalType::Support, vec!["analysis_result".to_string()]);
        sg.status = SubGoalStatus::Success;
        state.sub_goals = vec![sg];
        state
            .completed_outputs
            .insert(1, HashMap::from([("analysis_result".to_string(), serde_json::json!({}))]));
        assert!(select_inputs(&state).is_empty());
    }
}
