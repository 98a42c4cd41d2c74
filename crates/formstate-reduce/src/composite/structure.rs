//! Adding and removing children.

use std::sync::Arc;

use formstate_model::{CompositeState, Controls, FormState, FormValue, create_form_state};
use tracing::{debug, warn};

/// Insert (or overwrite) the child `name` of a group.
pub(crate) fn add_control(
    state: &CompositeState,
    name: &str,
    value: &FormValue,
) -> Option<CompositeState> {
    let Controls::Group(children) = state.controls() else {
        debug!(control_id = %state.id(), "cannot add a named control to an array, ignoring");
        return None;
    };
    let mut next = (**children).clone();
    next.insert(
        name.to_string(),
        create_form_state(state.id().child(name), value.clone()),
    );
    Some(state.with_controls(Controls::Group(Arc::new(next))))
}

pub(crate) fn remove_control(state: &CompositeState, name: &str) -> Option<CompositeState> {
    let Controls::Group(children) = state.controls() else {
        debug!(control_id = %state.id(), "cannot remove a named control from an array, ignoring");
        return None;
    };
    if !children.contains_key(name) {
        return None;
    }
    let mut next = (**children).clone();
    next.shift_remove(name);
    Some(state.with_controls(Controls::Group(Arc::new(next))))
}

/// Insert a child into an array at `index`, appending when it is absent.
///
/// Children at and after the insertion point move up by one and are
/// re-identified accordingly.
pub(crate) fn add_array_control(
    state: &CompositeState,
    value: &FormValue,
    index: Option<usize>,
) -> Option<CompositeState> {
    let Controls::Array(children) = state.controls() else {
        debug!(control_id = %state.id(), "cannot add an indexed control to a group, ignoring");
        return None;
    };
    let index = index.unwrap_or(children.len());
    if index > children.len() {
        warn!(
            control_id = %state.id(),
            index,
            len = children.len(),
            "insert index is past the end of the array, ignoring"
        );
        return None;
    }
    let id = state.id();
    let mut next: Vec<FormState> = Vec::with_capacity(children.len() + 1);
    next.extend(children[..index].iter().cloned());
    next.push(create_form_state(id.index(index), value.clone()));
    next.extend(
        children[index..]
            .iter()
            .enumerate()
            .map(|(offset, child)| child.with_id(id.index(index + offset + 1))),
    );
    Some(state.with_controls(Controls::Array(Arc::new(next))))
}

/// Remove the child at `index`, re-identifying the children after it.
pub(crate) fn remove_array_control(state: &CompositeState, index: usize) -> Option<CompositeState> {
    let Controls::Array(children) = state.controls() else {
        debug!(control_id = %state.id(), "cannot remove an indexed control from a group, ignoring");
        return None;
    };
    if index >= children.len() {
        debug!(
            control_id = %state.id(),
            index,
            len = children.len(),
            "remove index out of range, ignoring"
        );
        return None;
    }
    let id = state.id();
    let next: Vec<FormState> = children[..index]
        .iter()
        .cloned()
        .chain(
            children[index + 1..]
                .iter()
                .enumerate()
                .map(|(offset, child)| child.with_id(id.index(index + offset))),
        )
        .collect();
    Some(state.with_controls(Controls::Array(Arc::new(next))))
}
