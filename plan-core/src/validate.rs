//! InputRef validation (spec.md §4.4 rule 4, §8 testable property 3).
//!
//! Shared by the Planner (creation-time, two-pass validation against prior
//! sub-goals + same-batch siblings + `completed_outputs`) and the Dispatch
//! Router (dispatch-time readiness, which only needs the simpler
//! `completed_outputs`-only check — a pending sub-goal already passed
//! creation-time validation, so readiness only asks "have its dependencies
//! *resolved* yet").

use crate::error::InputRefError;
use crate::id::SubGoalId;
use crate::model::InputRef;
use std::collections::{HashMap, HashSet};

/// Computes the slot set a given source id exposes, per spec.md §4.4 rule 4:
/// "`keys(completed_outputs[from])` if present, otherwise the declared
/// outputs of the source sub-goal (looked up via the registry)."
///
/// `declared_outputs` is a lookup from sub-goal id (existing or same-batch)
/// to that sub-goal's registry-declared `outputs` — used only when the
/// source has not completed yet (no entry in `completed_outputs`).
pub fn slot_set_for_source(
    from: SubGoalId,
    completed_outputs: &HashMap<u64, HashMap<String, serde_json::Value>>,
    declared_outputs: &dyn Fn(SubGoalId) -> Option<Vec<String>>,
) -> Option<HashSet<String>> {
    if let Some(slots) = completed_outputs.get(&from.value()) {
        return Some(slots.keys().cloned().collect());
    }
    declared_outputs(from).map(|outputs| outputs.into_iter().collect())
}

/// Validates one `(name, InputRef)` pair at sub-goal creation time
/// (spec.md §4.4 rule 4, §8 property 3).
///
/// `valid_ids` is `existingSubGoalIds ∪ newBatchIds ∪ keys(completed_outputs)`.
/// `declared_outputs` resolves a not-yet-completed source's registry outputs.
pub fn validate_input_ref(
    name: &str,
    input_ref: &InputRef,
    valid_ids: &HashSet<u64>,
    completed_outputs: &HashMap<u64, HashMap<String, serde_json::Value>>,
    declared_outputs: &dyn Fn(SubGoalId) -> Option<Vec<String>>,
) -> Result<(), InputRefError> {
    let from = input_ref.from_sub_goal;
    if !valid_ids.contains(&from.value()) {
        return Err(InputRefError::UnknownSource {
            input_name: name.to_string(),
            from: from.value(),
        });
    }
    let slots = slot_set_for_source(from, completed_outputs, declared_outputs).ok_or_else(|| {
        InputRefError::UnknownSource {
            input_name: name.to_string(),
            from: from.value(),
        }
    })?;
    if !slots.contains(&input_ref.slot) {
        return Err(InputRefError::UnknownSlot {
            input_name: name.to_string(),
            from: from.value(),
            slot: input_ref.slot.clone(),
        });
    }
    Ok(())
}

/// Dispatch-time readiness check (spec.md §4.5, §8 property 4): every
/// `InputRef`'s `from` is a key of `completed_outputs` and its `slot` is in
/// the stored mapping — independent of sibling sub-goal statuses.
pub fn is_ready(
    inputs: &HashMap<String, InputRef>,
    completed_outputs: &HashMap<u64, HashMap<String, serde_json::Value>>,
) -> bool {
    inputs.values().all(|input_ref| {
        completed_outputs
            .get(&input_ref.from_sub_goal.value())
            .is_some_and(|slots| slots.contains_key(&input_ref.slot))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(vals: &[u64]) -> HashSet<u64> {
        vals.iter().copied().collect()
    }

    #[test]
    fn valid_ref_into_completed_outputs() {
        let mut completed = HashMap::new();
        completed.insert(1u64, {
            let mut m = HashMap::new();
            m.insert("answer".to_string(), serde_json::json!("hi"));
            m
        });
        let valid = ids(&[0, 1]);
        let r = InputRef::new(1u64, "answer");
        assert!(validate_input_ref("x", &r, &valid, &completed, &|_| None).is_ok());
    }

    #[test]
    fn unknown_source_is_rejected() {
        let completed = HashMap::new();
        let valid = ids(&[0, 1]);
        let r = InputRef::new(999u64, "answer");
        let err = validate_input_ref("x", &r, &valid, &completed, &|_| None).unwrap_err();
        assert_eq!(
            err,
            InputRefError::UnknownSource {
                input_name: "x".to_string(),
                from: 999
            }
        );
    }

    #[test]
    fn same_batch_sibling_uses_declared_outputs() {
        let completed = HashMap::new();
        let valid = ids(&[0, 1, 2]);
        let r = InputRef::new(2u64, "es_query");
        let declared = |id: SubGoalId| -> Option<Vec<String>> {
            if id.value() == 2 {
                Some(vec!["es_query".to_string()])
            } else {
                None
            }
        };
        assert!(validate_input_ref("x", &r, &valid, &completed, &declared).is_ok());
    }

    #[test]
    fn unknown_slot_is_rejected() {
        let completed = HashMap::new();
        let valid = ids(&[0, 1, 2]);
        let r = InputRef::new(2u64, "nonexistent");
        let declared = |_: SubGoalId| Some(vec!["es_query".to_string()]);
        let err = validate_input_ref("x", &r, &valid, &completed, &declared).unwrap_err();
        assert_eq!(
            err,
            InputRefError::UnknownSlot {
                input_name: "x".to_string(),
                from: 2,
                slot: "nonexistent".to_string()
            }
        );
    }

    #[test]
    fn readiness_checks_completed_outputs_only() {
        let mut completed = HashMap::new();
        completed.insert(1u64, {
            let mut m = HashMap::new();
            m.insert("es_query".to_string(), serde_json::json!("q"));
            m
        });
        let mut inputs = HashMap::new();
        inputs.insert("q".to_string(), InputRef::new(1u64, "es_query"));
        assert!(is_ready(&inputs, &completed));

        inputs.insert("missing".to_string(), InputRef::new(2u64, "x"));
        assert!(!is_ready(&inputs, &completed));
    }

    proptest::proptest! {
        /// Testable property 3 (spec.md §8): a sub-goal created with
        /// `status != failed` has every InputRef resolvable against prior
        /// sub-goal ids / same-batch sibling ids / completed_outputs keys,
        /// with the slot present in the source's slot set. This property
        /// test fuzzes over ref targets and confirms `validate_input_ref`
        /// accepts exactly the refs that satisfy that definition, never more.
        #[test]
        fn soundness_holds_for_arbitrary_refs(
            from in 0u64..8,
            slot_idx in 0u64..4,
            valid_from in proptest::collection::hash_set(0u64..8, 0..8),
        ) {
            let slot_name = format!("slot{slot_idx}");
            let mut completed = HashMap::new();
            for &id in &valid_from {
                let mut m = HashMap::new();
                m.insert(slot_name.clone(), serde_json::json!(null));
                completed.insert(id, m);
            }
            let valid_ids: HashSet<u64> = valid_from.clone();
            let r = InputRef::new(from, slot_name.clone());
            let result = validate_input_ref("x", &r, &valid_ids, &completed, &|_| None);
            let should_be_ok = valid_from.contains(&from);
            prop_assert_eq!(result.is_ok(), should_be_ok);
        }
    }
}
