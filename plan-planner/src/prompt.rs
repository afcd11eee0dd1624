//! Builds the planning prompt (spec.md §4.4): user goal, registry listing,
//! completed outputs (truncated), failed sub-goals, pending sub-goals with
//! unmet dependencies, and the round budget.

use plan_core::{PlanState, SubGoal, SubGoalStatus, WorkerRegistry};

/// Values longer than this are truncated in the prompt for token economy.
const MAX_VALUE_CHARS: usize = 200;

fn truncate(value: &serde_json::Value) -> String {
    let rendered = value.to_string();
    if rendered.len() > MAX_VALUE_CHARS {
        format!("{}... (truncated)", &rendered[..MAX_VALUE_CHARS])
    } else {
        rendered
    }
}

fn format_registry(registry: &WorkerRegistry) -> String {
    let mut out = String::new();
    for capability in registry.capabilities() {
        out.push_str(&format!(
            "- {} ({:?}): {} | outputs: {:?} | preconditions: {:?}\n",
            capability.name,
            capability.goal_type,
            capability.description,
            capability.outputs,
            capability.preconditions
        ));
    }
    out
}

fn format_completed_outputs(state: &PlanState) -> String {
    let mut entries: Vec<_> = state.completed_outputs.iter().collect();
    entries.sort_by_key(|(id, _)| **id);
    let mut out = String::new();
    for (id, slots) in entries {
        out.push_str(&format!("- sub_goal {id}:\n"));
        for (slot, value) in slots {
            out.push_str(&format!("    {slot} = {}\n", truncate(value)));
        }
    }
    out
}

fn format_failed(sub_goals: &[SubGoal]) -> String {
    sub_goals
        .iter()
        .filter(|sg| sg.status == SubGoalStatus::Failed)
        .map(|sg| {
            format!(
                "- sub_goal {} ({}): {}",
                sg.id,
                sg.worker,
                sg.error.as_deref().unwrap_or("unknown error")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_pending(sub_goals: &[SubGoal], completed: &PlanState) -> String {
    sub_goals
        .iter()
        .filter(|sg| sg.status == SubGoalStatus::Pending)
        .map(|sg| {
            let unmet: Vec<_> = sg
                .inputs
                .iter()
                .filter(|(_, input_ref)| {
                    !completed
                        .completed_outputs
                        .get(&input_ref.from_sub_goal.value())
                        .is_some_and(|slots| slots.contains_key(&input_ref.slot))
                })
                .map(|(name, input_ref)| {
                    format!("{name} <- sub_goal {} slot {}", input_ref.from_sub_goal, input_ref.slot)
                })
                .collect();
            format!("- sub_goal {} ({}): waiting on [{}]", sg.id, sg.worker, unmet.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the full planning prompt for one round.
pub fn build_planning_prompt(state: &PlanState, registry: &WorkerRegistry) -> String {
    format!(
        "user goal: {}\n\n\
         round: {} / {}\n\n\
         available workers:\n{}\n\
         completed outputs:\n{}\n\
         failed sub-goals:\n{}\n\n\
         pending sub-goals:\n{}\n",
        state.question,
        state.round,
        state.max_rounds,
        format_registry(registry),
        format_completed_outputs(state),
        format_failed(&state.sub_goals),
        format_pending(&state.sub_goals, state),
    )
}
