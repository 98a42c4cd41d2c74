//! Composite (group and array) reducer.
//!
//! An action addressed at the composite itself is applied here; one
//! addressed at a descendant is forwarded into the children, after which the
//! composite is recomputed from them. Status flags are aggregates over the
//! children, so the mark, enable and disable actions are broadcast to every
//! child instead of being stored on the composite.

mod children;
mod set_value;
mod structure;

use std::sync::Arc;

use formstate_model::{Action, ActionKind, CompositeState};

use crate::own;

/// Apply `action` to a composite or one of its descendants.
///
/// Returns the same `Arc` when nothing in the subtree changed.
pub fn reduce_composite(state: &Arc<CompositeState>, action: &Action) -> Arc<CompositeState> {
    // Composites have no focus or keyboard state of their own.
    if matches!(
        action.kind,
        ActionKind::Focus | ActionKind::Unfocus | ActionKind::SetLastKeyDownCode { .. }
    ) {
        return children::child_reducer(state, action);
    }
    if &action.control_id != state.id() {
        return children::child_reducer(state, action);
    }
    apply(state, &action.kind).map_or_else(|| Arc::clone(state), Arc::new)
}

fn apply(state: &CompositeState, kind: &ActionKind) -> Option<CompositeState> {
    match kind {
        ActionKind::SetValue { value } => set_value::set_value(state, value),
        ActionKind::SetErrors { errors } => {
            let own = errors.without_child_entries().unwrap_or_else(|| errors.clone());
            let unchanged = own.iter().eq(state.errors().own_entries());
            (!unchanged).then(|| state.with_errors(&own))
        }
        ActionKind::StartAsyncValidation { name } => {
            own::start_async_validation(state.pending_validations(), name)
                .map(|pending| state.with_pending_validations(pending))
        }
        ActionKind::SetAsyncError { name, value } => {
            own::set_async_error(state.errors(), state.pending_validations(), name, value)
                .map(|(errors, pending)| state.with_errors(&errors).with_pending_validations(pending))
        }
        ActionKind::ClearAsyncError { name } => {
            own::clear_async_error(state.errors(), state.pending_validations(), name)
                .map(|(errors, pending)| state.with_errors(&errors).with_pending_validations(pending))
        }
        ActionKind::MarkAsDirty
        | ActionKind::MarkAsPristine
        | ActionKind::Enable
        | ActionKind::Disable
        | ActionKind::MarkAsTouched
        | ActionKind::MarkAsUntouched
        | ActionKind::MarkAsSubmitted
        | ActionKind::MarkAsUnsubmitted => children::broadcast(state, kind),
        ActionKind::AddControl { name, value } => structure::add_control(state, name, value),
        ActionKind::RemoveControl { name } => structure::remove_control(state, name),
        ActionKind::AddArrayControl { value, index } => {
            structure::add_array_control(state, value, *index)
        }
        ActionKind::RemoveArrayControl { index } => {
            structure::remove_array_control(state, *index)
        }
        ActionKind::SetUserDefinedProperty { name, value } => state
            .user_defined_properties()
            .with(name, value.clone())
            .map(|properties| state.with_user_defined_properties(properties)),
        // Routed to the children by `reduce_composite`.
        ActionKind::Focus | ActionKind::Unfocus | ActionKind::SetLastKeyDownCode { .. } => None,
    }
}
