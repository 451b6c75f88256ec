//! Tagged property value.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Value carried by a property of a vertex or edge.
///
/// The tag decides which accessor is valid. Reading a value through the
/// wrong accessor yields [`Error::TypeMismatch`]; nothing is coerced.
///
/// Ordering is total: values order by tag first (`Null < Bool < Long <
/// String < Map`), then by payload. This is what lets a `PropertyValue`
/// key a [`PropertyValue::Map`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Long(i64),
    String(String),
    Map(#[serde(with = "map_entries")] BTreeMap<PropertyValue, PropertyValue>),
}

// ============================================================================
// Type checking
// ============================================================================

impl PropertyValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Null => "NULL",
            PropertyValue::Bool(_) => "BOOLEAN",
            PropertyValue::Long(_) => "LONG",
            PropertyValue::String(_) => "STRING",
            PropertyValue::Map(_) => "MAP",
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, PropertyValue::Null) }
    pub fn is_string(&self) -> bool { matches!(self, PropertyValue::String(_)) }
    pub fn is_map(&self) -> bool { matches!(self, PropertyValue::Map(_)) }

    fn mismatch(&self, expected: &str) -> Error {
        Error::TypeMismatch {
            expected: expected.to_string(),
            got: self.type_name().to_string(),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            PropertyValue::Bool(b) => Ok(*b),
            other => Err(other.mismatch("BOOLEAN")),
        }
    }

    pub fn as_long(&self) -> Result<i64> {
        match self {
            PropertyValue::Long(i) => Ok(*i),
            other => Err(other.mismatch("LONG")),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            PropertyValue::String(s) => Ok(s),
            other => Err(other.mismatch("STRING")),
        }
    }

    pub fn as_map(&self) -> Result<&BTreeMap<PropertyValue, PropertyValue>> {
        match self {
            PropertyValue::Map(m) => Ok(m),
            other => Err(other.mismatch("MAP")),
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for PropertyValue { fn from(v: bool) -> Self { PropertyValue::Bool(v) } }
impl From<i32> for PropertyValue { fn from(v: i32) -> Self { PropertyValue::Long(v as i64) } }
impl From<i64> for PropertyValue { fn from(v: i64) -> Self { PropertyValue::Long(v) } }
impl From<String> for PropertyValue { fn from(v: String) -> Self { PropertyValue::String(v) } }
impl From<&str> for PropertyValue { fn from(v: &str) -> Self { PropertyValue::String(v.to_owned()) } }
impl From<BTreeMap<PropertyValue, PropertyValue>> for PropertyValue {
    fn from(v: BTreeMap<PropertyValue, PropertyValue>) -> Self { PropertyValue::Map(v) }
}
impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(PropertyValue::Null) }
}

/// Build a map value from `(key, value)` pairs.
impl<K, V> FromIterator<(K, V)> for PropertyValue
where
    K: Into<PropertyValue>,
    V: Into<PropertyValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PropertyValue::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => write!(f, "null"),
            PropertyValue::Bool(b) => write!(f, "{b}"),
            PropertyValue::Long(i) => write!(f, "{i}"),
            PropertyValue::String(s) => write!(f, "{s}"),
            PropertyValue::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// JSON object keys must be strings, so map values travel as a list of
/// `[key, value]` pairs.
mod map_entries {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::PropertyValue;

    pub fn serialize<S>(map: &BTreeMap<PropertyValue, PropertyValue>, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let entries: Vec<(&PropertyValue, &PropertyValue)> = map.iter().collect();
        entries.serialize(ser)
    }

    pub fn deserialize<'de, D>(de: D) -> Result<BTreeMap<PropertyValue, PropertyValue>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<(PropertyValue, PropertyValue)>::deserialize(de)?;
        Ok(entries.into_iter().collect())
    }
}
