use thiserror::Error;

use crate::ids::ControlId;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("control id must have at least one segment")]
    EmptyControlId,
    #[error("invalid control id {0:?}: empty path segment")]
    InvalidControlId(String),
    #[error("initial value for {id} is not a group or array")]
    NotComposite { id: ControlId },
}

pub type Result<T> = std::result::Result<T, ModelError>;
