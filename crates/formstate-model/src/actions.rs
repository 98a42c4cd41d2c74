//! The closed set of actions a form state tree reacts to.
//!
//! Every action is addressed at one node through its `control_id`. The
//! serialized form is a flat object with a `type` tag:
//!
//! ```json
//! { "type": "SET_VALUE", "control_id": "form.name", "value": "Ada" }
//! ```
//!
//! `controlId` is accepted in place of `control_id` when reading.

use serde::{Deserialize, Serialize};

use crate::ids::ControlId;
use crate::validation::ValidationErrors;
use crate::value::FormValue;

/// Namespace of the type tags returned by [`ActionKind::type_name`].
pub const ACTION_TYPE_PREFIX: &str = "formstate/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(alias = "controlId")]
    pub control_id: ControlId,
    #[serde(flatten)]
    pub kind: ActionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    SetValue {
        value: FormValue,
    },
    SetErrors {
        errors: ValidationErrors,
    },
    StartAsyncValidation {
        name: String,
    },
    /// A falsy `value` reports that the validation passed.
    SetAsyncError {
        name: String,
        value: FormValue,
    },
    ClearAsyncError {
        name: String,
    },
    MarkAsDirty,
    MarkAsPristine,
    Enable,
    Disable,
    MarkAsTouched,
    MarkAsUntouched,
    MarkAsSubmitted,
    MarkAsUnsubmitted,
    Focus,
    Unfocus,
    SetLastKeyDownCode {
        code: Option<u32>,
    },
    AddControl {
        name: String,
        value: FormValue,
    },
    RemoveControl {
        name: String,
    },
    AddArrayControl {
        value: FormValue,
        #[serde(default)]
        index: Option<usize>,
    },
    RemoveArrayControl {
        index: usize,
    },
    SetUserDefinedProperty {
        name: String,
        value: FormValue,
    },
}

impl ActionKind {
    /// Stable, namespaced type tag (e.g. `formstate/SET_VALUE`).
    pub fn type_name(&self) -> &'static str {
        match self {
            ActionKind::SetValue { .. } => "formstate/SET_VALUE",
            ActionKind::SetErrors { .. } => "formstate/SET_ERRORS",
            ActionKind::StartAsyncValidation { .. } => "formstate/START_ASYNC_VALIDATION",
            ActionKind::SetAsyncError { .. } => "formstate/SET_ASYNC_ERROR",
            ActionKind::ClearAsyncError { .. } => "formstate/CLEAR_ASYNC_ERROR",
            ActionKind::MarkAsDirty => "formstate/MARK_AS_DIRTY",
            ActionKind::MarkAsPristine => "formstate/MARK_AS_PRISTINE",
            ActionKind::Enable => "formstate/ENABLE",
            ActionKind::Disable => "formstate/DISABLE",
            ActionKind::MarkAsTouched => "formstate/MARK_AS_TOUCHED",
            ActionKind::MarkAsUntouched => "formstate/MARK_AS_UNTOUCHED",
            ActionKind::MarkAsSubmitted => "formstate/MARK_AS_SUBMITTED",
            ActionKind::MarkAsUnsubmitted => "formstate/MARK_AS_UNSUBMITTED",
            ActionKind::Focus => "formstate/FOCUS",
            ActionKind::Unfocus => "formstate/UNFOCUS",
            ActionKind::SetLastKeyDownCode { .. } => "formstate/SET_LAST_KEY_DOWN_CODE",
            ActionKind::AddControl { .. } => "formstate/ADD_CONTROL",
            ActionKind::RemoveControl { .. } => "formstate/REMOVE_CONTROL",
            ActionKind::AddArrayControl { .. } => "formstate/ADD_ARRAY_CONTROL",
            ActionKind::RemoveArrayControl { .. } => "formstate/REMOVE_ARRAY_CONTROL",
            ActionKind::SetUserDefinedProperty { .. } => "formstate/SET_USER_DEFINED_PROPERTY",
        }
    }
}

impl Action {
    pub fn new(control_id: ControlId, kind: ActionKind) -> Self {
        Self { control_id, kind }
    }

    /// The same action addressed at another node.
    #[must_use]
    pub fn readdressed(&self, control_id: ControlId) -> Self {
        Self::new(control_id, self.kind.clone())
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn set_value(control_id: ControlId, value: impl Into<FormValue>) -> Self {
        Self::new(control_id, ActionKind::SetValue { value: value.into() })
    }

    pub fn set_errors(control_id: ControlId, errors: ValidationErrors) -> Self {
        Self::new(control_id, ActionKind::SetErrors { errors })
    }

    pub fn start_async_validation(control_id: ControlId, name: impl Into<String>) -> Self {
        Self::new(
            control_id,
            ActionKind::StartAsyncValidation { name: name.into() },
        )
    }

    pub fn set_async_error(
        control_id: ControlId,
        name: impl Into<String>,
        value: impl Into<FormValue>,
    ) -> Self {
        Self::new(
            control_id,
            ActionKind::SetAsyncError {
                name: name.into(),
                value: value.into(),
            },
        )
    }

    pub fn clear_async_error(control_id: ControlId, name: impl Into<String>) -> Self {
        Self::new(control_id, ActionKind::ClearAsyncError { name: name.into() })
    }

    pub fn mark_as_dirty(control_id: ControlId) -> Self {
        Self::new(control_id, ActionKind::MarkAsDirty)
    }

    pub fn mark_as_pristine(control_id: ControlId) -> Self {
        Self::new(control_id, ActionKind::MarkAsPristine)
    }

    pub fn enable(control_id: ControlId) -> Self {
        Self::new(control_id, ActionKind::Enable)
    }

    pub fn disable(control_id: ControlId) -> Self {
        Self::new(control_id, ActionKind::Disable)
    }

    pub fn mark_as_touched(control_id: ControlId) -> Self {
        Self::new(control_id, ActionKind::MarkAsTouched)
    }

    pub fn mark_as_untouched(control_id: ControlId) -> Self {
        Self::new(control_id, ActionKind::MarkAsUntouched)
    }

    pub fn mark_as_submitted(control_id: ControlId) -> Self {
        Self::new(control_id, ActionKind::MarkAsSubmitted)
    }

    pub fn mark_as_unsubmitted(control_id: ControlId) -> Self {
        Self::new(control_id, ActionKind::MarkAsUnsubmitted)
    }

    pub fn focus(control_id: ControlId) -> Self {
        Self::new(control_id, ActionKind::Focus)
    }

    pub fn unfocus(control_id: ControlId) -> Self {
        Self::new(control_id, ActionKind::Unfocus)
    }

    pub fn set_last_key_down_code(control_id: ControlId, code: Option<u32>) -> Self {
        Self::new(control_id, ActionKind::SetLastKeyDownCode { code })
    }

    pub fn add_control(
        control_id: ControlId,
        name: impl Into<String>,
        value: impl Into<FormValue>,
    ) -> Self {
        Self::new(
            control_id,
            ActionKind::AddControl {
                name: name.into(),
                value: value.into(),
            },
        )
    }

    pub fn remove_control(control_id: ControlId, name: impl Into<String>) -> Self {
        Self::new(control_id, ActionKind::RemoveControl { name: name.into() })
    }

    pub fn add_array_control(
        control_id: ControlId,
        value: impl Into<FormValue>,
        index: Option<usize>,
    ) -> Self {
        Self::new(
            control_id,
            ActionKind::AddArrayControl {
                value: value.into(),
                index,
            },
        )
    }

    pub fn remove_array_control(control_id: ControlId, index: usize) -> Self {
        Self::new(control_id, ActionKind::RemoveArrayControl { index })
    }

    pub fn set_user_defined_property(
        control_id: ControlId,
        name: impl Into<String>,
        value: impl Into<FormValue>,
    ) -> Self {
        Self::new(
            control_id,
            ActionKind::SetUserDefinedProperty {
                name: name.into(),
                value: value.into(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_share_prefix() {
        let id = ControlId::root("form");
        let actions = [
            Action::set_value(id.clone(), "x"),
            Action::mark_as_dirty(id.clone()),
            Action::remove_array_control(id, 0),
        ];
        for action in &actions {
            assert!(action.type_name().starts_with(ACTION_TYPE_PREFIX));
        }
        assert_eq!(actions[1].type_name(), "formstate/MARK_AS_DIRTY");
    }

    #[test]
    fn deserializes_flat_tagged_form() {
        let action: Action = serde_json::from_str(
            r#"{ "type": "SET_ASYNC_ERROR", "control_id": "form.name", "name": "taken", "value": true }"#,
        )
        .expect("parse action");
        assert_eq!(
            action,
            Action::set_async_error(ControlId::root("form").child("name"), "taken", true)
        );

        let action: Action =
            serde_json::from_str(r#"{ "type": "MARK_AS_TOUCHED", "control_id": "form" }"#)
                .expect("parse unit action");
        assert_eq!(action.kind, ActionKind::MarkAsTouched);

        let action: Action =
            serde_json::from_str(r#"{ "type": "FOCUS", "controlId": "form.name" }"#)
                .expect("parse camelCase id");
        assert_eq!(action.control_id, ControlId::root("form").child("name"));

        let action: Action = serde_json::from_str(
            r#"{ "type": "ADD_ARRAY_CONTROL", "control_id": "form.tags", "value": "x" }"#,
        )
        .expect("parse array insert");
        assert_eq!(
            action.kind,
            ActionKind::AddArrayControl {
                value: FormValue::from("x"),
                index: None
            }
        );
    }
}
