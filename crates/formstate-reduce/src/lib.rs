//! Pure reducers for form state trees.
//!
//! Every function here takes a tree and an [`Action`] and returns the next
//! tree without mutating the input. Nodes the action does not change are
//! shared between the two trees, and a reduction that changes nothing
//! returns the input handle itself, so callers detect change with
//! [`FormState::ptr_eq`].
//!
//! - **control**: leaf reducer
//! - **composite**: group and array reducer (routing, broadcast, structural
//!   edits, value reconciliation)
//! - [`reduce`] / [`reduce_all`]: entry points dispatching on node kind
//! - [`form_group_reducer`] / [`form_array_reducer`]: entry points that
//!   insist on a particular composite kind

mod composite;
mod control;
pub mod error;
mod own;

use formstate_model::{Action, CompositeKind, FormState};
use tracing::trace;

pub use composite::reduce_composite;
pub use control::reduce_control;
pub use error::{ReduceError, Result};

use crate::error::kind_name;

/// Apply one action to a tree.
pub fn reduce(state: &FormState, action: &Action) -> FormState {
    let next = reduce_node(state, action);
    trace!(
        action = action.type_name(),
        control_id = %action.control_id,
        changed = !next.ptr_eq(state),
        "reduced"
    );
    next
}

/// Apply `actions` in order, returning the final tree.
pub fn reduce_all<'a, I>(state: &FormState, actions: I) -> FormState
where
    I: IntoIterator<Item = &'a Action>,
{
    actions
        .into_iter()
        .fold(state.clone(), |state, action| reduce(&state, action))
}

/// Reduce a tree whose root must be a group.
pub fn form_group_reducer(state: &FormState, action: &Action) -> Result<FormState> {
    match composite_kind(state) {
        Some(CompositeKind::Group) => Ok(reduce(state, action)),
        found => Err(ReduceError::NotAGroup {
            id: state.id().clone(),
            found: kind_name(found),
        }),
    }
}

/// Reduce a tree whose root must be an array.
pub fn form_array_reducer(state: &FormState, action: &Action) -> Result<FormState> {
    match composite_kind(state) {
        Some(CompositeKind::Array) => Ok(reduce(state, action)),
        found => Err(ReduceError::NotAnArray {
            id: state.id().clone(),
            found: kind_name(found),
        }),
    }
}

fn composite_kind(state: &FormState) -> Option<CompositeKind> {
    state.as_composite().map(|composite| composite.kind())
}

pub(crate) fn reduce_node(state: &FormState, action: &Action) -> FormState {
    match state {
        FormState::Control(control) => FormState::Control(reduce_control(control, action)),
        FormState::Composite(composite) => FormState::Composite(reduce_composite(composite, action)),
    }
}
