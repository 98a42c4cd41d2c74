//! Validation error maps.
//!
//! An empty map means valid. Composite states additionally carry one summary
//! entry per invalid child, keyed with [`CHILD_ERROR_PREFIX`] followed by the
//! child's key, whose value shares the child's own map.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::FormValue;

/// Prefix of composite error keys that summarize a child's errors.
pub const CHILD_ERROR_PREFIX: &str = "_";

/// Prefix of error keys produced by asynchronous validation.
pub const ASYNC_ERROR_PREFIX: &str = "$";

/// Error key of the child stored under `key`.
pub fn child_error_key(key: &str) -> String {
    format!("{CHILD_ERROR_PREFIX}{key}")
}

/// Error key reported by the async validation `name`.
pub fn async_error_key(name: &str) -> String {
    format!("{ASYNC_ERROR_PREFIX}{name}")
}

pub fn is_child_error_key(key: &str) -> bool {
    key.starts_with(CHILD_ERROR_PREFIX)
}

/// Shared, copy-on-write map of error name to detail.
#[derive(Clone, Default)]
pub struct ValidationErrors(Arc<IndexMap<String, FormValue>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries that were set on this node directly (not child summaries).
    pub fn own_entries(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.iter().filter(|(key, _)| !is_child_error_key(key))
    }

    /// Copy of this map without child summary entries, or `None` when it
    /// holds none.
    pub fn without_child_entries(&self) -> Option<Self> {
        if !self.keys().any(is_child_error_key) {
            return None;
        }
        Some(
            self.own_entries()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    /// Errors of the child stored under `key`, as summarized on a composite.
    pub fn child(&self, key: &str) -> Option<ValidationErrors> {
        match self.0.get(&child_error_key(key)) {
            Some(FormValue::Group(map)) => Some(Self(Arc::clone(map))),
            _ => None,
        }
    }

    /// Copy with `key` set to `value`; `None` when the entry is already
    /// identical.
    pub fn with(&self, key: &str, value: FormValue) -> Option<Self> {
        if self.0.get(key).is_some_and(|current| current.same(&value)) {
            return None;
        }
        let mut map = (*self.0).clone();
        map.insert(key.to_string(), value);
        Some(Self(Arc::new(map)))
    }

    /// Copy without `key`; `None` when the key is absent.
    pub fn without(&self, key: &str) -> Option<Self> {
        if !self.0.contains_key(key) {
            return None;
        }
        let mut map = (*self.0).clone();
        map.shift_remove(key);
        Some(Self(Arc::new(map)))
    }

    /// This map as a group value sharing the same allocation.
    pub fn to_value(&self) -> FormValue {
        FormValue::Group(Arc::clone(&self.0))
    }

    /// True when `value` is a group sharing this map's allocation.
    pub fn is_shared_by(&self, value: &FormValue) -> bool {
        matches!(value, FormValue::Group(map) if Arc::ptr_eq(map, &self.0))
    }

    pub fn ptr_eq(&self, other: &ValidationErrors) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ValidationErrors {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl std::fmt::Debug for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<K: Into<String>> FromIterator<(K, FormValue)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (K, FormValue)>>(iter: I) -> Self {
        Self(Arc::new(
            iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for ValidationErrors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IndexMap::<String, FormValue>::deserialize(deserializer).map(|map| Self(Arc::new(map)))
    }
}
