use thiserror::Error;

use formstate_model::{CompositeKind, ControlId};

#[derive(Debug, Error)]
pub enum ReduceError {
    #[error("state {id} must be a group state, found {found}")]
    NotAGroup { id: ControlId, found: &'static str },
    #[error("state {id} must be an array state, found {found}")]
    NotAnArray { id: ControlId, found: &'static str },
}

/// Human-readable node kind for error messages.
pub(crate) fn kind_name(kind: Option<CompositeKind>) -> &'static str {
    kind.map_or("control", |kind| kind.as_str())
}

pub type Result<T> = std::result::Result<T, ReduceError>;
