//! JSON shape of node states.
//!
//! Fields use camelCase and every status pair is written out in full, so a
//! serialized tree can be read without knowing which half of a pair is
//! stored.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::state::{CompositeState, ControlState, Controls, FormState};

impl Serialize for ControlState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ControlState", 19)?;
        s.serialize_field("id", self.id())?;
        s.serialize_field("value", self.value())?;
        s.serialize_field("errors", self.errors())?;
        s.serialize_field("pendingValidations", self.pending_validations())?;
        s.serialize_field("isValidationPending", &self.is_validation_pending())?;
        s.serialize_field("isValid", &self.is_valid())?;
        s.serialize_field("isInvalid", &self.is_invalid())?;
        s.serialize_field("isEnabled", &self.is_enabled())?;
        s.serialize_field("isDisabled", &self.is_disabled())?;
        s.serialize_field("isDirty", &self.is_dirty())?;
        s.serialize_field("isPristine", &self.is_pristine())?;
        s.serialize_field("isTouched", &self.is_touched())?;
        s.serialize_field("isUntouched", &self.is_untouched())?;
        s.serialize_field("isSubmitted", &self.is_submitted())?;
        s.serialize_field("isUnsubmitted", &self.is_unsubmitted())?;
        s.serialize_field("isFocused", &self.is_focused())?;
        s.serialize_field("isUnfocused", &self.is_unfocused())?;
        s.serialize_field("userDefinedProperties", self.user_defined_properties())?;
        s.serialize_field("lastKeyDownCode", &self.last_key_down_code())?;
        s.end()
    }
}

impl Serialize for CompositeState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("CompositeState", 16)?;
        s.serialize_field("id", self.id())?;
        s.serialize_field("value", self.value())?;
        s.serialize_field("errors", self.errors())?;
        s.serialize_field("pendingValidations", self.pending_validations())?;
        s.serialize_field("isValidationPending", &self.is_validation_pending())?;
        s.serialize_field("isValid", &self.is_valid())?;
        s.serialize_field("isInvalid", &self.is_invalid())?;
        s.serialize_field("isEnabled", &self.is_enabled())?;
        s.serialize_field("isDisabled", &self.is_disabled())?;
        s.serialize_field("isDirty", &self.is_dirty())?;
        s.serialize_field("isPristine", &self.is_pristine())?;
        s.serialize_field("isTouched", &self.is_touched())?;
        s.serialize_field("isUntouched", &self.is_untouched())?;
        s.serialize_field("isSubmitted", &self.is_submitted())?;
        s.serialize_field("isUnsubmitted", &self.is_unsubmitted())?;
        s.serialize_field("userDefinedProperties", self.user_defined_properties())?;
        s.serialize_field("controls", self.controls())?;
        s.end()
    }
}

impl Serialize for Controls {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Controls::Group(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (key, child) in map.iter() {
                    m.serialize_entry(key, child)?;
                }
                m.end()
            }
            Controls::Array(items) => serializer.collect_seq(items.iter()),
        }
    }
}

impl Serialize for FormState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FormState::Control(state) => state.serialize(serializer),
            FormState::Composite(state) => state.serialize(serializer),
        }
    }
}
