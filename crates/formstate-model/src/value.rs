//! Plain value graph held by form states.
//!
//! Leaves hold scalars; groups and arrays hold shared collections so that an
//! unchanged subtree can be handed back by pointer. [`FormValue::same`] is the
//! identity test the reducers use for structural sharing, while `PartialEq`
//! compares structurally.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Keyed children of a group value, in insertion order.
pub type ValueMap = IndexMap<String, FormValue>;

#[derive(Debug, Clone, Default)]
pub enum FormValue {
    /// Absent value (covers both `null` and `undefined` inputs).
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Group(Arc<ValueMap>),
    Array(Arc<Vec<FormValue>>),
}

impl FormValue {
    pub fn group<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, FormValue)>,
        K: Into<String>,
    {
        Self::Group(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = FormValue>,
    {
        Self::Array(Arc::new(items.into_iter().collect()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for groups and arrays.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Group(_) | Self::Array(_))
    }

    /// Truthiness used by async error reporting: `null`, `false`, `0`, `NaN`
    /// and the empty string are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Group(_) | Self::Array(_) => true,
        }
    }

    /// Identity check: scalars by value, composites by allocation.
    pub fn same(&self, other: &FormValue) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Group(a), Self::Group(b)) => Arc::ptr_eq(a, b),
            (Self::Array(a), Self::Array(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Arc<ValueMap>> {
        match self {
            Self::Group(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Arc<Vec<FormValue>>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Child value stored under `key` of a group.
    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.as_group().and_then(|map| map.get(key))
    }

    /// Element at `index` of an array.
    pub fn at(&self, index: usize) -> Option<&FormValue> {
        self.as_array().and_then(|items| items.get(index))
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => number_to_json(*n),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Group(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Self::Array(items) => {
                serde_json::Value::Array(items.iter().map(FormValue::to_json).collect())
            }
        }
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    // Integral values keep their integer JSON form.
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        #[allow(clippy::cast_possible_truncation)]
        return serde_json::Value::Number(serde_json::Number::from(n as i64));
    }
    serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
}

impl PartialEq for FormValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Group(a), Self::Group(b)) => Arc::ptr_eq(a, b) || a == b,
            (Self::Array(a), Self::Array(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => self.same(other),
        }
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Group(_) | Self::Array(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl From<serde_json::Value> for FormValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(Arc::new(items.into_iter().map(Self::from).collect()))
            }
            serde_json::Value::Object(map) => Self::Group(Arc::new(
                map.into_iter().map(|(k, v)| (k, Self::from(v))).collect(),
            )),
        }
    }
}

impl From<&FormValue> for serde_json::Value {
    fn from(value: &FormValue) -> Self {
        value.to_json()
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FormValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for FormValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<FormValue>> From<Option<T>> for FormValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl Serialize for FormValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => match number_to_json(*n) {
                serde_json::Value::Number(number) => number.serialize(serializer),
                _ => serializer.serialize_unit(),
            },
            Self::String(s) => serializer.serialize_str(s),
            Self::Group(map) => serializer.collect_map(map.iter()),
            Self::Array(items) => serializer.collect_seq(items.iter()),
        }
    }
}

impl<'de> Deserialize<'de> for FormValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}
