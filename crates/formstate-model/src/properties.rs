use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::value::FormValue;

/// Arbitrary caller-owned properties attached to a node.
#[derive(Clone, Default)]
pub struct UserProperties(Arc<IndexMap<String, FormValue>>);

impl UserProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy with `name` set; `None` when the property already holds `value`.
    pub fn with(&self, name: &str, value: FormValue) -> Option<Self> {
        if self.0.get(name).is_some_and(|current| current.same(&value)) {
            return None;
        }
        let mut map = (*self.0).clone();
        map.insert(name.to_string(), value);
        Some(Self(Arc::new(map)))
    }

    pub fn ptr_eq(&self, other: &UserProperties) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for UserProperties {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl std::fmt::Debug for UserProperties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<K: Into<String>> FromIterator<(K, FormValue)> for UserProperties {
    fn from_iter<I: IntoIterator<Item = (K, FormValue)>>(iter: I) -> Self {
        Self(Arc::new(
            iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }
}

impl Serialize for UserProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}
