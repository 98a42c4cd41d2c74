//! Bottom-up recomputation of composite state from its children.
//!
//! Value and errors are rebuilt only when a child actually changed them;
//! otherwise the prior value or error map is handed back unchanged so that
//! identity survives every level of the tree.

use std::sync::Arc;

use crate::ids::ControlId;
use crate::pending::PendingValidations;
use crate::properties::UserProperties;
use crate::state::{CompositeState, Controls, FormState};
use crate::validation::{ValidationErrors, child_error_key, is_child_error_key};
use crate::value::{FormValue, ValueMap};

impl CompositeState {
    /// Build a composite from its children and its own data.
    ///
    /// `prior_value` and `prior_errors` are the node's previous value and
    /// error map. They are returned as-is when the children still agree with
    /// them, and only the own (non child-summary) entries of `prior_errors`
    /// are carried over. Status flags are the OR of the children's flags,
    /// so a node without children is pristine, disabled, untouched and
    /// unsubmitted.
    pub fn aggregate(
        id: ControlId,
        controls: Controls,
        prior_value: &FormValue,
        prior_errors: &ValidationErrors,
        pending_validations: PendingValidations,
        user_defined_properties: UserProperties,
    ) -> Self {
        let value = aggregate_value(&controls, prior_value);
        let errors = aggregate_errors(&controls, prior_errors);
        let any = |flag: fn(&FormState) -> bool| controls.states().any(flag);
        let dirty = any(FormState::is_dirty);
        let enabled = any(FormState::is_enabled);
        let touched = any(FormState::is_touched);
        let submitted = any(FormState::is_submitted);
        Self {
            id,
            value,
            errors,
            pending_validations,
            user_defined_properties,
            controls,
            dirty,
            enabled,
            touched,
            submitted,
        }
    }
}

fn aggregate_value(controls: &Controls, prior: &FormValue) -> FormValue {
    match controls {
        Controls::Group(map) => {
            let unchanged = prior.as_group().is_some_and(|prior| {
                prior.len() == map.len()
                    && map.iter().all(|(key, child)| {
                        prior.get(key).is_some_and(|value| value.same(child.value()))
                    })
            });
            if unchanged {
                return prior.clone();
            }
            let value: ValueMap = map
                .iter()
                .map(|(key, child)| (key.clone(), child.value().clone()))
                .collect();
            FormValue::Group(Arc::new(value))
        }
        Controls::Array(items) => {
            let unchanged = prior.as_array().is_some_and(|prior| {
                prior.len() == items.len()
                    && prior
                        .iter()
                        .zip(items.iter())
                        .all(|(value, child)| value.same(child.value()))
            });
            if unchanged {
                return prior.clone();
            }
            FormValue::array(items.iter().map(|child| child.value().clone()))
        }
    }
}

fn aggregate_errors(controls: &Controls, prior: &ValidationErrors) -> ValidationErrors {
    let own_count = prior.own_entries().count();
    let mut child_count = 0usize;
    let mut changed = false;
    for (key, child) in controls.iter() {
        let child_errors = child.errors();
        let summary = prior.get(&child_error_key(&key));
        if child_errors.is_empty() {
            changed |= summary.is_some();
        } else {
            child_count += 1;
            changed |= !summary.is_some_and(|value| child_errors.is_shared_by(value));
        }
    }
    // Stale summaries of removed children also count as a change.
    changed |= own_count + child_count != prior.len();
    if !changed {
        return prior.clone();
    }

    let own = prior
        .iter()
        .filter(|(key, _)| !is_child_error_key(key))
        .map(|(key, value)| (key.to_string(), value.clone()));
    let children = controls
        .iter()
        .filter(|(_, child)| !child.errors().is_empty())
        .map(|(key, child)| (child_error_key(&key), child.errors().to_value()))
        .collect::<Vec<_>>();
    own.chain(children).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ControlState;
    use indexmap::IndexMap;

    fn leaf(id: &ControlId, key: &str, value: &str) -> FormState {
        ControlState::new(id.child(key), FormValue::from(value)).into()
    }

    fn group(children: Vec<(&str, FormState)>) -> Controls {
        Controls::Group(Arc::new(
            children
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<IndexMap<_, _>>(),
        ))
    }

    #[test]
    fn empty_composite_is_vacuously_false() {
        let id = ControlId::root("form");
        let state = CompositeState::aggregate(
            id,
            Controls::Array(Arc::new(Vec::new())),
            &FormValue::array([]),
            &ValidationErrors::new(),
            PendingValidations::new(),
            UserProperties::new(),
        );
        assert!(state.is_pristine());
        assert!(state.is_disabled());
        assert!(state.is_untouched());
        assert!(state.is_unsubmitted());
        assert!(state.is_valid());
    }

    #[test]
    fn unchanged_children_keep_prior_value_and_errors() {
        let id = ControlId::root("form");
        let controls = group(vec![("a", leaf(&id, "a", "x")), ("b", leaf(&id, "b", "y"))]);
        let prior_value = FormValue::group([("a", FormValue::from("x")), ("b", FormValue::from("y"))]);
        let prior_errors = ValidationErrors::new();
        let state = CompositeState::aggregate(
            id,
            controls,
            &prior_value,
            &prior_errors,
            PendingValidations::new(),
            UserProperties::new(),
        );
        assert!(state.value().same(&prior_value));
        assert!(state.errors().ptr_eq(&prior_errors));
    }

    #[test]
    fn child_errors_are_summarized_and_own_errors_kept() {
        let id = ControlId::root("form");
        let child_errors: ValidationErrors =
            [("required", FormValue::from(true))].into_iter().collect();
        let invalid: FormState = ControlState::new(id.child("a"), FormValue::from(""))
            .with_errors(child_errors.clone())
            .into();
        let controls = group(vec![("a", invalid), ("b", leaf(&id, "b", "y"))]);
        let prior_errors: ValidationErrors = [
            ("custom", FormValue::from(true)),
            ("_gone", FormValue::from(true)),
        ]
        .into_iter()
        .collect();

        let state = CompositeState::aggregate(
            id,
            controls,
            &FormValue::Null,
            &prior_errors,
            PendingValidations::new(),
            UserProperties::new(),
        );
        assert_eq!(state.errors().keys().collect::<Vec<_>>(), vec!["custom", "_a"]);
        assert!(state.errors().child("a").is_some_and(|e| e.ptr_eq(&child_errors)));
        assert!(state.is_invalid());

        let again = state.with_controls(state.controls().clone());
        assert!(again.errors().ptr_eq(state.errors()));
        assert!(again.value().same(state.value()));
    }

    #[test]
    fn flags_are_or_of_children() {
        let id = ControlId::root("form");
        let dirty: FormState = ControlState::new(id.child("a"), FormValue::Null)
            .with_dirty(true)
            .with_enabled(false)
            .into();
        let clean: FormState = ControlState::new(id.child("b"), FormValue::Null)
            .with_enabled(false)
            .into();
        let controls = group(vec![("a", dirty), ("b", clean)]);
        let state = CompositeState::aggregate(
            id,
            controls,
            &FormValue::Null,
            &ValidationErrors::new(),
            PendingValidations::new(),
            UserProperties::new(),
        );
        assert!(state.is_dirty());
        assert!(state.is_disabled());
        assert!(state.is_untouched());
    }
}
