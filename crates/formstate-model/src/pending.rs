use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Names of async validations currently in flight, in start order.
#[derive(Clone, Default)]
pub struct PendingValidations(Arc<Vec<String>>);

impl PendingValidations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|pending| pending == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Copy with `name` appended; `None` when it is already pending.
    pub fn with(&self, name: &str) -> Option<Self> {
        if self.contains(name) {
            return None;
        }
        let mut names = (*self.0).clone();
        names.push(name.to_string());
        Some(Self(Arc::new(names)))
    }

    /// Copy without `name`; `None` when it is not pending.
    pub fn without(&self, name: &str) -> Option<Self> {
        if !self.contains(name) {
            return None;
        }
        Some(Self(Arc::new(
            self.0.iter().filter(|pending| *pending != name).cloned().collect(),
        )))
    }

    pub fn ptr_eq(&self, other: &PendingValidations) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for PendingValidations {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl std::fmt::Debug for PendingValidations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<S: Into<String>> FromIterator<S> for PendingValidations {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut names: Vec<String> = Vec::new();
        for name in iter {
            let name = name.into();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Self(Arc::new(names))
    }
}

impl Serialize for PendingValidations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for PendingValidations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<String>::deserialize(deserializer).map(|names| names.into_iter().collect())
    }
}
