//! SetValue applied to a composite itself.
//!
//! The new value is reconciled against the existing children: matching
//! children receive their slice recursively, new keys or indices get fresh
//! children, and children without a slice are dropped.

use std::sync::Arc;

use formstate_model::{
    Action, CompositeState, ControlId, Controls, FormState, FormValue, ValueMap, create_form_state,
};
use indexmap::IndexMap;
use tracing::warn;

use crate::reduce_node;

pub(crate) fn set_value(state: &CompositeState, value: &FormValue) -> Option<CompositeState> {
    if state.value().same(value) {
        return None;
    }
    let controls = match (state.controls(), value) {
        (Controls::Group(children), FormValue::Group(values)) => {
            reconcile_group(state.id(), children, values)
        }
        (Controls::Array(children), FormValue::Array(values)) => {
            reconcile_array(state.id(), children, values)
        }
        (controls, _) => {
            warn!(
                control_id = %state.id(),
                kind = controls.kind().as_str(),
                "value does not match the composite's shape, ignoring"
            );
            return None;
        }
    }?;
    // The new value is handed in as the prior value so the result keeps the
    // caller's allocation when every child took its slice as-is.
    Some(CompositeState::aggregate(
        state.id().clone(),
        controls,
        value,
        state.errors(),
        state.pending_validations().clone(),
        state.user_defined_properties().clone(),
    ))
}

fn reconcile_group(
    id: &ControlId,
    children: &Arc<IndexMap<String, FormState>>,
    values: &ValueMap,
) -> Option<Controls> {
    let mut changed = children.len() != values.len();
    let next: IndexMap<String, FormState> = values
        .iter()
        .map(|(key, slice)| {
            let child = match children.get(key) {
                Some(existing) => {
                    let next = set_child_value(existing, slice);
                    changed |= !next.ptr_eq(existing);
                    next
                }
                None => {
                    changed = true;
                    create_form_state(id.child(key.as_str()), slice.clone())
                }
            };
            (key.clone(), child)
        })
        .collect();
    changed.then(|| Controls::Group(Arc::new(next)))
}

fn reconcile_array(
    id: &ControlId,
    children: &Arc<Vec<FormState>>,
    values: &[FormValue],
) -> Option<Controls> {
    let mut changed = children.len() != values.len();
    let next: Vec<FormState> = values
        .iter()
        .enumerate()
        .map(|(idx, slice)| match children.get(idx) {
            Some(existing) => {
                let next = set_child_value(existing, slice);
                changed |= !next.ptr_eq(existing);
                next
            }
            None => create_form_state(id.index(idx), slice.clone()),
        })
        .collect();
    changed.then(|| Controls::Array(Arc::new(next)))
}

/// Hand `slice` to `child`, rebuilding it when its node kind no longer fits.
fn set_child_value(child: &FormState, slice: &FormValue) -> FormState {
    let fits = match (child, slice) {
        (FormState::Control(_), FormValue::Group(_) | FormValue::Array(_)) => false,
        (FormState::Control(_), _) => true,
        (FormState::Composite(state), FormValue::Group(_)) => state.is_group(),
        (FormState::Composite(state), FormValue::Array(_)) => state.is_array(),
        (FormState::Composite(_), _) => false,
    };
    if fits {
        reduce_node(child, &Action::set_value(child.id().clone(), slice.clone()))
    } else {
        create_form_state(child.id().clone(), slice.clone())
    }
}
