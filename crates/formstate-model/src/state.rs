//! Node states of a form state tree.
//!
//! A tree is a [`FormState`]: either a leaf [`ControlState`] or a
//! [`CompositeState`] whose children are keyed (group) or indexed (array).
//! Nodes are shared behind `Arc`, and every transition returns either the
//! original handle or a fresh one, so callers detect change with
//! [`FormState::ptr_eq`].

use std::sync::Arc;

use indexmap::IndexMap;

use crate::ids::ControlId;
use crate::pending::PendingValidations;
use crate::properties::UserProperties;
use crate::validation::ValidationErrors;
use crate::value::FormValue;

/// Leaf node holding a single scalar value.
///
/// Each status pair is backed by one stored flag, so `is_dirty()` and
/// `is_pristine()` (and the other pairs) can never agree.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    id: ControlId,
    value: FormValue,
    errors: ValidationErrors,
    pending_validations: PendingValidations,
    user_defined_properties: UserProperties,
    last_key_down_code: Option<u32>,
    dirty: bool,
    enabled: bool,
    touched: bool,
    submitted: bool,
    focused: bool,
}

impl ControlState {
    /// Fresh leaf: valid, pristine, enabled, untouched, unsubmitted and
    /// unfocused.
    pub fn new(id: ControlId, value: FormValue) -> Self {
        Self {
            id,
            value,
            errors: ValidationErrors::new(),
            pending_validations: PendingValidations::new(),
            user_defined_properties: UserProperties::new(),
            last_key_down_code: None,
            dirty: false,
            enabled: true,
            touched: false,
            submitted: false,
            focused: false,
        }
    }

    pub fn id(&self) -> &ControlId {
        &self.id
    }

    pub fn value(&self) -> &FormValue {
        &self.value
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn pending_validations(&self) -> &PendingValidations {
        &self.pending_validations
    }

    pub fn user_defined_properties(&self) -> &UserProperties {
        &self.user_defined_properties
    }

    pub fn last_key_down_code(&self) -> Option<u32> {
        self.last_key_down_code
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    pub fn is_validation_pending(&self) -> bool {
        !self.pending_validations.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_pristine(&self) -> bool {
        !self.dirty
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_disabled(&self) -> bool {
        !self.enabled
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_untouched(&self) -> bool {
        !self.touched
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn is_unsubmitted(&self) -> bool {
        !self.submitted
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_unfocused(&self) -> bool {
        !self.focused
    }

    #[must_use]
    pub fn with_id(mut self, id: ControlId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: FormValue) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_errors(mut self, errors: ValidationErrors) -> Self {
        self.errors = errors;
        self
    }

    #[must_use]
    pub fn with_pending_validations(mut self, pending: PendingValidations) -> Self {
        self.pending_validations = pending;
        self
    }

    #[must_use]
    pub fn with_user_defined_properties(mut self, properties: UserProperties) -> Self {
        self.user_defined_properties = properties;
        self
    }

    #[must_use]
    pub fn with_last_key_down_code(mut self, code: Option<u32>) -> Self {
        self.last_key_down_code = code;
        self
    }

    #[must_use]
    pub fn with_dirty(mut self, dirty: bool) -> Self {
        self.dirty = dirty;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_touched(mut self, touched: bool) -> Self {
        self.touched = touched;
        self
    }

    #[must_use]
    pub fn with_submitted(mut self, submitted: bool) -> Self {
        self.submitted = submitted;
        self
    }

    #[must_use]
    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// Shape of a composite node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    Group,
    Array,
}

impl CompositeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositeKind::Group => "group",
            CompositeKind::Array => "array",
        }
    }
}

/// Immediate children of a composite node.
#[derive(Debug, Clone, PartialEq)]
pub enum Controls {
    Group(Arc<IndexMap<String, FormState>>),
    Array(Arc<Vec<FormState>>),
}

impl Controls {
    pub fn kind(&self) -> CompositeKind {
        match self {
            Controls::Group(_) => CompositeKind::Group,
            Controls::Array(_) => CompositeKind::Array,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Controls::Group(map) => map.len(),
            Controls::Array(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Child stored under `key`; array children are addressed by their
    /// decimal index.
    pub fn get(&self, key: &str) -> Option<&FormState> {
        match self {
            Controls::Group(map) => map.get(key),
            Controls::Array(items) => key.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        }
    }

    /// Children in order, paired with their key (decimal index for arrays).
    pub fn iter(&self) -> Box<dyn Iterator<Item = (String, &FormState)> + '_> {
        match self {
            Controls::Group(map) => Box::new(map.iter().map(|(k, v)| (k.clone(), v))),
            Controls::Array(items) => {
                Box::new(items.iter().enumerate().map(|(idx, v)| (idx.to_string(), v)))
            }
        }
    }

    pub fn states(&self) -> Box<dyn Iterator<Item = &FormState> + '_> {
        match self {
            Controls::Group(map) => Box::new(map.values()),
            Controls::Array(items) => Box::new(items.iter()),
        }
    }

    pub fn ptr_eq(&self, other: &Controls) -> bool {
        match (self, other) {
            (Controls::Group(a), Controls::Group(b)) => Arc::ptr_eq(a, b),
            (Controls::Array(a), Controls::Array(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Group or array node whose value and status flags are aggregated from its
/// children.
///
/// Instances are only produced by [`CompositeState::aggregate`], which keeps
/// the cached aggregates consistent with `controls`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeState {
    pub(crate) id: ControlId,
    pub(crate) value: FormValue,
    pub(crate) errors: ValidationErrors,
    pub(crate) pending_validations: PendingValidations,
    pub(crate) user_defined_properties: UserProperties,
    pub(crate) controls: Controls,
    pub(crate) dirty: bool,
    pub(crate) enabled: bool,
    pub(crate) touched: bool,
    pub(crate) submitted: bool,
}

impl CompositeState {
    pub fn id(&self) -> &ControlId {
        &self.id
    }

    pub fn value(&self) -> &FormValue {
        &self.value
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn pending_validations(&self) -> &PendingValidations {
        &self.pending_validations
    }

    pub fn user_defined_properties(&self) -> &UserProperties {
        &self.user_defined_properties
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn kind(&self) -> CompositeKind {
        self.controls.kind()
    }

    pub fn is_group(&self) -> bool {
        self.kind() == CompositeKind::Group
    }

    pub fn is_array(&self) -> bool {
        self.kind() == CompositeKind::Array
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    pub fn is_validation_pending(&self) -> bool {
        !self.pending_validations.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_pristine(&self) -> bool {
        !self.dirty
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_disabled(&self) -> bool {
        !self.enabled
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_untouched(&self) -> bool {
        !self.touched
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn is_unsubmitted(&self) -> bool {
        !self.submitted
    }

    /// Recompute with new children, keeping this node's own data.
    #[must_use]
    pub fn with_controls(&self, controls: Controls) -> Self {
        Self::aggregate(
            self.id.clone(),
            controls,
            &self.value,
            &self.errors,
            self.pending_validations.clone(),
            self.user_defined_properties.clone(),
        )
    }

    /// Recompute with a new set of own errors. Child summary entries in
    /// `errors` are ignored and rebuilt from the children.
    #[must_use]
    pub fn with_errors(&self, errors: &ValidationErrors) -> Self {
        Self::aggregate(
            self.id.clone(),
            self.controls.clone(),
            &self.value,
            errors,
            self.pending_validations.clone(),
            self.user_defined_properties.clone(),
        )
    }

    #[must_use]
    pub fn with_pending_validations(&self, pending: PendingValidations) -> Self {
        Self {
            pending_validations: pending,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_user_defined_properties(&self, properties: UserProperties) -> Self {
        Self {
            user_defined_properties: properties,
            ..self.clone()
        }
    }
}

/// Any node of a form state tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Control(Arc<ControlState>),
    Composite(Arc<CompositeState>),
}

macro_rules! delegate {
    ($($name:ident -> $ret:ty),* $(,)?) => {
        $(
            pub fn $name(&self) -> $ret {
                match self {
                    FormState::Control(state) => state.$name(),
                    FormState::Composite(state) => state.$name(),
                }
            }
        )*
    };
}

impl FormState {
    delegate! {
        id -> &ControlId,
        value -> &FormValue,
        errors -> &ValidationErrors,
        pending_validations -> &PendingValidations,
        user_defined_properties -> &UserProperties,
        is_valid -> bool,
        is_invalid -> bool,
        is_validation_pending -> bool,
        is_dirty -> bool,
        is_pristine -> bool,
        is_enabled -> bool,
        is_disabled -> bool,
        is_touched -> bool,
        is_untouched -> bool,
        is_submitted -> bool,
        is_unsubmitted -> bool,
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, FormState::Composite(_))
    }

    pub fn is_control(&self) -> bool {
        matches!(self, FormState::Control(_))
    }

    pub fn as_composite(&self) -> Option<&Arc<CompositeState>> {
        match self {
            FormState::Composite(state) => Some(state),
            FormState::Control(_) => None,
        }
    }

    pub fn as_control(&self) -> Option<&Arc<ControlState>> {
        match self {
            FormState::Control(state) => Some(state),
            FormState::Composite(_) => None,
        }
    }

    /// True when both handles point at the same node.
    pub fn ptr_eq(&self, other: &FormState) -> bool {
        match (self, other) {
            (FormState::Control(a), FormState::Control(b)) => Arc::ptr_eq(a, b),
            (FormState::Composite(a), FormState::Composite(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Node at `id`, searching this subtree.
    pub fn find(&self, id: &ControlId) -> Option<&FormState> {
        if self.id() == id {
            return Some(self);
        }
        if !self.id().is_ancestor_of(id) {
            return None;
        }
        let composite = self.as_composite()?;
        let key = id.segments().get(self.id().depth())?;
        composite.controls().get(key)?.find(id)
    }

    /// Depth-first, pre-order walk over this subtree.
    pub fn walk(&self) -> Vec<&FormState> {
        let mut nodes = vec![self];
        if let FormState::Composite(state) = self {
            for child in state.controls().states() {
                nodes.extend(child.walk());
            }
        }
        nodes
    }

    /// The same subtree re-addressed under `id`.
    ///
    /// Only structural edits (inserting or removing array elements) move a
    /// subtree; all other state is carried over.
    #[must_use]
    pub fn with_id(&self, id: ControlId) -> FormState {
        if self.id() == &id {
            return self.clone();
        }
        match self {
            FormState::Control(state) => {
                FormState::Control(Arc::new(state.as_ref().clone().with_id(id)))
            }
            FormState::Composite(state) => {
                let controls = match state.controls() {
                    Controls::Group(map) => Controls::Group(Arc::new(
                        map.iter()
                            .map(|(key, child)| (key.clone(), child.with_id(id.child(key.as_str()))))
                            .collect(),
                    )),
                    Controls::Array(items) => Controls::Array(Arc::new(
                        items
                            .iter()
                            .enumerate()
                            .map(|(idx, child)| child.with_id(id.index(idx)))
                            .collect(),
                    )),
                };
                FormState::Composite(Arc::new(CompositeState::aggregate(
                    id,
                    controls,
                    state.value(),
                    state.errors(),
                    state.pending_validations().clone(),
                    state.user_defined_properties().clone(),
                )))
            }
        }
    }
}

impl From<ControlState> for FormState {
    fn from(state: ControlState) -> Self {
        FormState::Control(Arc::new(state))
    }
}

impl From<CompositeState> for FormState {
    fn from(state: CompositeState) -> Self {
        FormState::Composite(Arc::new(state))
    }
}
