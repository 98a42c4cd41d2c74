//! Transitions of the fields every node owns directly: errors, pending
//! validations and user properties.
//!
//! Each function returns `None` when the transition would not change
//! anything, so callers can hand back the original node.

use formstate_model::{FormValue, PendingValidations, ValidationErrors, async_error_key};

/// Own errors and pending validations after an async validation step.
pub(crate) type AsyncFields = (ValidationErrors, PendingValidations);

pub(crate) fn start_async_validation(
    pending: &PendingValidations,
    name: &str,
) -> Option<PendingValidations> {
    pending.with(name)
}

/// A truthy `value` stores `$name`; a falsy one removes it. `name` stops
/// being pending either way.
pub(crate) fn set_async_error(
    errors: &ValidationErrors,
    pending: &PendingValidations,
    name: &str,
    value: &FormValue,
) -> Option<AsyncFields> {
    let key = async_error_key(name);
    let next_errors = if value.is_truthy() {
        errors.with(&key, value.clone())
    } else {
        errors.without(&key)
    };
    combine(errors, pending, next_errors, pending.without(name))
}

/// No-op unless `name` is pending.
pub(crate) fn clear_async_error(
    errors: &ValidationErrors,
    pending: &PendingValidations,
    name: &str,
) -> Option<AsyncFields> {
    let next_pending = pending.without(name)?;
    let next_errors = errors.without(&async_error_key(name));
    combine(errors, pending, next_errors, Some(next_pending))
}

fn combine(
    errors: &ValidationErrors,
    pending: &PendingValidations,
    next_errors: Option<ValidationErrors>,
    next_pending: Option<PendingValidations>,
) -> Option<AsyncFields> {
    if next_errors.is_none() && next_pending.is_none() {
        return None;
    }
    Some((
        next_errors.unwrap_or_else(|| errors.clone()),
        next_pending.unwrap_or_else(|| pending.clone()),
    ))
}
