use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ModelError;

/// Separator used when a control id is rendered as a single string.
pub const PATH_SEPARATOR: char = '.';

/// Hierarchical address of a node in a form state tree.
///
/// Ids are compared segment by segment, so a group key that itself contains
/// a dot (`["root", "a.b"]`) is never confused with the nested path
/// `["root", "a", "b"]`, even though both render as `root.a.b`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlId(Arc<[String]>);

impl ControlId {
    /// Id of a tree root.
    pub fn root(name: impl Into<String>) -> Self {
        Self(Arc::from(vec![name.into()]))
    }

    pub fn from_segments<I, S>(segments: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(ModelError::EmptyControlId);
        }
        Ok(Self(Arc::from(segments)))
    }

    /// Parse a dotted id such as `form.address.0`.
    ///
    /// Every segment becomes a plain key; use [`ControlId::from_segments`]
    /// when a key contains the separator.
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        if value.is_empty() {
            return Err(ModelError::EmptyControlId);
        }
        let segments: Vec<String> = value.split(PATH_SEPARATOR).map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(ModelError::InvalidControlId(value.to_string()));
        }
        Ok(Self(Arc::from(segments)))
    }

    /// Id of the child stored under `key`.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.to_vec();
        segments.push(key.into());
        Self(Arc::from(segments))
    }

    /// Id of the array element at `index`.
    pub fn index(&self, index: usize) -> Self {
        self.child(index.to_string())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Key of this node within its parent (the root name for roots).
    pub fn last(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn parent(&self) -> Option<Self> {
        if self.0.len() < 2 {
            return None;
        }
        Some(Self(Arc::from(&self.0[..self.0.len() - 1])))
    }

    /// True when `other` lies strictly below this id.
    pub fn is_ancestor_of(&self, other: &ControlId) -> bool {
        other.0.len() > self.0.len() && other.0[..self.0.len()] == self.0[..]
    }

    /// True when `other` is this id or lies below it.
    pub fn contains(&self, other: &ControlId) -> bool {
        self == other || self.is_ancestor_of(other)
    }

    /// Replace the leading `old_prefix` segments with `new_prefix`.
    ///
    /// Returns `None` when `old_prefix` does not contain this id.
    pub fn rebase(&self, old_prefix: &ControlId, new_prefix: &ControlId) -> Option<Self> {
        if !old_prefix.contains(self) {
            return None;
        }
        let mut segments = new_prefix.0.to_vec();
        segments.extend(self.0[old_prefix.0.len()..].iter().cloned());
        Some(Self(Arc::from(segments)))
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ControlId({:?})", &self.0[..])
    }
}

impl FromStr for ControlId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ControlId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ControlId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Dotted(String),
            Segments(Vec<String>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Dotted(value) => Self::parse(&value).map_err(serde::de::Error::custom),
            Repr::Segments(segments) => {
                Self::from_segments(segments).map_err(serde::de::Error::custom)
            }
        }
    }
}
