//! Form control state tree.
//!
//! This crate holds the data side of form state handling: hierarchical
//! control ids, the plain value graph, error maps, leaf and composite node
//! states, the bottom-up aggregation routine and the closed action set. The
//! reducers that apply actions live in `formstate-reduce`.

pub mod actions;
mod aggregate;
pub mod create;
pub mod error;
pub mod ids;
pub mod pending;
pub mod properties;
mod serialize;
pub mod state;
pub mod validation;
pub mod value;

pub use actions::{ACTION_TYPE_PREFIX, Action, ActionKind};
pub use create::{create_composite_state, create_control_state, create_form_state};
pub use error::{ModelError, Result};
pub use ids::ControlId;
pub use pending::PendingValidations;
pub use properties::UserProperties;
pub use state::{CompositeKind, CompositeState, ControlState, Controls, FormState};
pub use validation::{
    ASYNC_ERROR_PREFIX, CHILD_ERROR_PREFIX, ValidationErrors, async_error_key, child_error_key,
    is_child_error_key,
};
pub use value::{FormValue, ValueMap};
