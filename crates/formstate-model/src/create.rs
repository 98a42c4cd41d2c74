//! Building an initial state tree from a plain value.

use std::sync::Arc;

use crate::error::{ModelError, Result};
use crate::ids::ControlId;
use crate::pending::PendingValidations;
use crate::properties::UserProperties;
use crate::state::{CompositeState, ControlState, Controls, FormState};
use crate::validation::ValidationErrors;
use crate::value::FormValue;

/// Fresh leaf holding `value`.
pub fn create_control_state(id: ControlId, value: impl Into<FormValue>) -> ControlState {
    ControlState::new(id, value.into())
}

/// Composite tree mirroring `value`, with every child addressed below `id`.
///
/// The resulting state's value is `value` itself (same allocation).
pub fn create_composite_state(id: ControlId, value: &FormValue) -> Result<CompositeState> {
    let controls = match value {
        FormValue::Group(map) => Controls::Group(Arc::new(
            map.iter()
                .map(|(key, child)| (key.clone(), create_form_state(id.child(key.as_str()), child.clone())))
                .collect(),
        )),
        FormValue::Array(items) => Controls::Array(Arc::new(
            items
                .iter()
                .enumerate()
                .map(|(idx, child)| create_form_state(id.index(idx), child.clone()))
                .collect(),
        )),
        _ => return Err(ModelError::NotComposite { id }),
    };
    Ok(CompositeState::aggregate(
        id,
        controls,
        value,
        &ValidationErrors::new(),
        PendingValidations::new(),
        UserProperties::new(),
    ))
}

/// Leaf for scalar values, composite for groups and arrays.
pub fn create_form_state(id: ControlId, value: FormValue) -> FormState {
    match create_composite_state(id.clone(), &value) {
        Ok(state) => state.into(),
        Err(_) => create_control_state(id, value).into(),
    }
}
