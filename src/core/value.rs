//! Setting values and their declared types.
//!
//! Settings are booleans, unsigned integers, strings, or enumerations.
//! Enumerations carry the id of their enum type alongside the numeric
//! variant, so two enums with the same numeric value never compare equal.
//!
//! ## At-rest form
//!
//! Values are written to disk as plain JSON scalars: `true`, `40`,
//! `"C:/shots"`. Enumerations are written as their numeric form, so the
//! declared type from the descriptor is needed to read them back.

use serde::{Deserialize, Serialize};

/// Identifier of an enumeration type (equalizer mode, battle effects, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnumTypeId(pub u16);

impl EnumTypeId {
    /// Create a new enum type ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EnumTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Enum({})", self.0)
    }
}

/// Declared type of a setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Bool,
    UInt,
    Str,
    Enum(EnumTypeId),
}

impl ValueType {
    /// Check whether a value has this type.
    #[must_use]
    pub fn admits(self, value: &Value) -> bool {
        value.value_type() == self
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Bool => write!(f, "bool"),
            ValueType::UInt => write!(f, "uint"),
            ValueType::Str => write!(f, "string"),
            ValueType::Enum(id) => write!(f, "{}", id),
        }
    }
}

/// A setting value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Bool(bool),
    UInt(u32),
    Str(String),
    Enum(EnumTypeId, u32),
}

impl Value {
    /// The type tag of this value.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::UInt(_) => ValueType::UInt,
            Value::Str(_) => ValueType::Str,
            Value::Enum(id, _) => ValueType::Enum(*id),
        }
    }

    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as integer if this is a UInt value.
    #[must_use]
    pub fn as_uint(&self) -> Option<u32> {
        match self {
            Value::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a Str value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the numeric variant if this is an Enum value.
    #[must_use]
    pub fn as_enum(&self) -> Option<u32> {
        match self {
            Value::Enum(_, v) => Some(*v),
            _ => None,
        }
    }

    /// Encode as a JSON scalar.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Bool(v) => serde_json::Value::Bool(*v),
            Value::UInt(v) | Value::Enum(_, v) => serde_json::Value::from(*v),
            Value::Str(s) => serde_json::Value::String(s.clone()),
        }
    }

    /// Decode a JSON scalar as the given type.
    ///
    /// Returns `None` if the JSON shape does not fit the type.
    #[must_use]
    pub fn from_json(json: &serde_json::Value, ty: ValueType) -> Option<Value> {
        match ty {
            ValueType::Bool => json.as_bool().map(Value::Bool),
            ValueType::UInt => json.as_u64().and_then(|v| u32::try_from(v).ok()).map(Value::UInt),
            ValueType::Str => json.as_str().map(|s| Value::Str(s.to_string())),
            ValueType::Enum(id) => json
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .map(|v| Value::Enum(id, v)),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::UInt(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Enum(id, v) => write!(f, "{}::{}", id, v),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

/// Valid input range of a setting.
///
/// Integers are bounded by value, strings by length, enumerations by
/// the set of numeric variants they define.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidRange {
    /// No restriction beyond the type (booleans).
    Any,
    /// Inclusive numeric bounds.
    Numeric { min: u32, max: u32 },
    /// Inclusive string length bounds.
    Length { min: usize, max: usize },
    /// Allowed enumeration variants.
    Variants(&'static [u32]),
}

impl ValidRange {
    /// Check whether a value falls within this range.
    ///
    /// Values of a type the range does not describe are accepted; type
    /// checking is the descriptor's job.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        match (self, value) {
            (ValidRange::Numeric { min, max }, Value::UInt(v)) => (*min..=*max).contains(v),
            (ValidRange::Length { min, max }, Value::Str(s)) => (*min..=*max).contains(&s.chars().count()),
            (ValidRange::Variants(allowed), Value::Enum(_, v)) => allowed.contains(v),
            _ => true,
        }
    }
}
