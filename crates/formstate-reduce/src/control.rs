//! Leaf reducer.

use std::sync::Arc;

use formstate_model::{Action, ActionKind, ControlState, PendingValidations, ValidationErrors};
use tracing::{debug, warn};

use crate::own;

/// Apply `action` to a leaf.
///
/// Actions addressed at any other id leave the leaf untouched, as do
/// actions that would not change it. In both cases the same `Arc` is
/// returned.
pub fn reduce_control(state: &Arc<ControlState>, action: &Action) -> Arc<ControlState> {
    if &action.control_id != state.id() {
        return Arc::clone(state);
    }
    apply(state, &action.kind).map_or_else(|| Arc::clone(state), Arc::new)
}

fn apply(state: &ControlState, kind: &ActionKind) -> Option<ControlState> {
    match kind {
        ActionKind::SetValue { value } if value.is_composite() => {
            warn!(
                control_id = %state.id(),
                "group or array value addressed at a control, ignoring"
            );
            None
        }
        ActionKind::SetValue { value } => {
            (!state.value().same(value)).then(|| state.clone().with_value(value.clone()))
        }
        ActionKind::SetErrors { errors } => {
            (state.errors() != errors).then(|| state.clone().with_errors(errors.clone()))
        }
        ActionKind::StartAsyncValidation { name } => {
            own::start_async_validation(state.pending_validations(), name)
                .map(|pending| state.clone().with_pending_validations(pending))
        }
        ActionKind::SetAsyncError { name, value } => {
            own::set_async_error(state.errors(), state.pending_validations(), name, value)
                .map(|(errors, pending)| with_async_fields(state, errors, pending))
        }
        ActionKind::ClearAsyncError { name } => {
            own::clear_async_error(state.errors(), state.pending_validations(), name)
                .map(|(errors, pending)| with_async_fields(state, errors, pending))
        }
        ActionKind::MarkAsDirty => flag(state.is_dirty(), true, || {
            state.clone().with_dirty(true)
        }),
        ActionKind::MarkAsPristine => flag(state.is_dirty(), false, || {
            state.clone().with_dirty(false)
        }),
        ActionKind::Enable => flag(state.is_enabled(), true, || {
            state.clone().with_enabled(true)
        }),
        ActionKind::Disable => flag(state.is_enabled(), false, || {
            state.clone().with_enabled(false)
        }),
        ActionKind::MarkAsTouched => flag(state.is_touched(), true, || {
            state.clone().with_touched(true)
        }),
        ActionKind::MarkAsUntouched => flag(state.is_touched(), false, || {
            state.clone().with_touched(false)
        }),
        ActionKind::MarkAsSubmitted => flag(state.is_submitted(), true, || {
            state.clone().with_submitted(true)
        }),
        ActionKind::MarkAsUnsubmitted => flag(state.is_submitted(), false, || {
            state.clone().with_submitted(false)
        }),
        ActionKind::Focus => flag(state.is_focused(), true, || {
            state.clone().with_focused(true)
        }),
        ActionKind::Unfocus => flag(state.is_focused(), false, || {
            state.clone().with_focused(false)
        }),
        ActionKind::SetLastKeyDownCode { code } => (state.last_key_down_code() != *code)
            .then(|| state.clone().with_last_key_down_code(*code)),
        ActionKind::SetUserDefinedProperty { name, value } => state
            .user_defined_properties()
            .with(name, value.clone())
            .map(|properties| state.clone().with_user_defined_properties(properties)),
        ActionKind::AddControl { .. }
        | ActionKind::RemoveControl { .. }
        | ActionKind::AddArrayControl { .. }
        | ActionKind::RemoveArrayControl { .. } => {
            debug!(
                control_id = %state.id(),
                action = kind.type_name(),
                "structural action addressed at a control, ignoring"
            );
            None
        }
    }
}

fn flag(current: bool, wanted: bool, update: impl FnOnce() -> ControlState) -> Option<ControlState> {
    (current != wanted).then(update)
}

fn with_async_fields(
    state: &ControlState,
    errors: ValidationErrors,
    pending: PendingValidations,
) -> ControlState {
    state
        .clone()
        .with_errors(errors)
        .with_pending_validations(pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formstate_model::{ControlId, FormValue};

    fn leaf(value: &str) -> Arc<ControlState> {
        Arc::new(ControlState::new(ControlId::root("field"), FormValue::from(value)))
    }

    #[test]
    fn foreign_id_returns_same_state() {
        let state = leaf("a");
        let action = Action::set_value(ControlId::root("other"), "b");
        assert!(Arc::ptr_eq(&reduce_control(&state, &action), &state));
    }

    #[test]
    fn set_value_replaces_value() {
        let state = leaf("a");
        let next = reduce_control(&state, &Action::set_value(state.id().clone(), "b"));
        assert_eq!(next.value(), &FormValue::from("b"));

        let same = reduce_control(&next, &Action::set_value(state.id().clone(), "b"));
        assert!(Arc::ptr_eq(&same, &next));
    }

    #[test]
    fn set_value_rejects_composite_values() {
        let state = leaf("a");
        for value in [
            FormValue::group([("x", FormValue::from(1))]),
            FormValue::array([FormValue::from("b")]),
        ] {
            let next = reduce_control(&state, &Action::set_value(state.id().clone(), value));
            assert!(Arc::ptr_eq(&next, &state));
        }
    }

    #[test]
    fn focus_sets_pair() {
        let state = leaf("a");
        let focused = reduce_control(&state, &Action::focus(state.id().clone()));
        assert!(focused.is_focused());
        assert!(!focused.is_unfocused());
        let again = reduce_control(&focused, &Action::focus(state.id().clone()));
        assert!(Arc::ptr_eq(&again, &focused));
    }

    #[test]
    fn structural_actions_are_ignored() {
        let state = leaf("a");
        let action = Action::add_control(state.id().clone(), "x", "y");
        assert!(Arc::ptr_eq(&reduce_control(&state, &action), &state));
    }
}
