//! External config gateway: the live settings store as seen by the core.
//!
//! The client's settings store is a key/value service with read, write
//! and change notifications. The core talks to it only through
//! [`ConfigGateway`]; hosts implement the trait over the real client,
//! tests and tools use [`MemoryGateway`].
//!
//! ## Value conversion
//!
//! The store only knows booleans, unsigned integers and strings.
//! Enumerations travel as their underlying numeric form and are tagged
//! with their enum type again on the way back in.

mod memory;

pub use memory::MemoryGateway;

use crate::core::error::{Error, Result};
use crate::core::ids::Domain;
use crate::core::value::{Value, ValueType};
use crate::registry::{Descriptor, ExternalKey};

/// Primitive kind understood by the live store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LiveKind {
    Bool,
    UInt,
    Str,
}

impl LiveKind {
    /// The live-store kind a declared type is stored as.
    #[must_use]
    pub fn of(ty: ValueType) -> Self {
        match ty {
            ValueType::Bool => LiveKind::Bool,
            ValueType::UInt | ValueType::Enum(_) => LiveKind::UInt,
            ValueType::Str => LiveKind::Str,
        }
    }
}

/// A value as stored by the live store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiveValue {
    Bool(bool),
    UInt(u32),
    Str(String),
}

impl LiveValue {
    /// Kind of this value.
    #[must_use]
    pub fn kind(&self) -> LiveKind {
        match self {
            LiveValue::Bool(_) => LiveKind::Bool,
            LiveValue::UInt(_) => LiveKind::UInt,
            LiveValue::Str(_) => LiveKind::Str,
        }
    }

    /// Reinterpret as a typed setting value.
    ///
    /// Returns `None` if the kind does not match the declared type.
    #[must_use]
    pub fn into_value(self, ty: ValueType) -> Option<Value> {
        match (self, ty) {
            (LiveValue::Bool(v), ValueType::Bool) => Some(Value::Bool(v)),
            (LiveValue::UInt(v), ValueType::UInt) => Some(Value::UInt(v)),
            (LiveValue::UInt(v), ValueType::Enum(id)) => Some(Value::Enum(id, v)),
            (LiveValue::Str(s), ValueType::Str) => Some(Value::Str(s)),
            _ => None,
        }
    }
}

impl From<&Value> for LiveValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(v) => LiveValue::Bool(*v),
            Value::UInt(v) | Value::Enum(_, v) => LiveValue::UInt(*v),
            Value::Str(s) => LiveValue::Str(s.clone()),
        }
    }
}

/// Notification that one live setting changed.
///
/// Fired for every change, whether made by the player through the
/// client's own menu or by this crate applying a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConfigChange {
    pub key: ExternalKey,
}

impl ConfigChange {
    /// Create a change notification for a key.
    #[must_use]
    pub const fn new(key: ExternalKey) -> Self {
        Self { key }
    }

    /// Domain of the changed key.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.key.domain()
    }
}

/// Read/write access to the live settings store.
///
/// Implementations must be synchronous: the engine treats each call as
/// completing before the next one starts.
pub trait ConfigGateway {
    /// Read a key as the given kind.
    ///
    /// Returns `None` if the key is unset or holds another kind.
    fn try_get(&self, key: ExternalKey, kind: LiveKind) -> Option<LiveValue>;

    /// Write a key.
    fn set(&mut self, key: ExternalKey, value: LiveValue) -> Result<()>;

    // === Convenience Methods ===

    /// Read a setting with its declared type.
    fn read(&self, descriptor: &Descriptor) -> Option<Value> {
        self.try_get(descriptor.key, LiveKind::of(descriptor.value_type))
            .and_then(|live| live.into_value(descriptor.value_type))
    }

    /// Write a setting, converting enumerations to numeric form.
    fn write(&mut self, descriptor: &Descriptor, value: &Value) -> Result<()> {
        if !descriptor.value_type.admits(value) {
            return Err(Error::TypeMismatch {
                setting: descriptor.id.to_string(),
                expected: descriptor.value_type,
                found: value.value_type(),
            });
        }
        self.set(descriptor.key, LiveValue::from(value))
    }
}
