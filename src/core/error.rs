//! Crate errors

use thiserror::Error;

use super::ids::ZoneId;
use super::value::{Value, ValueType};

/// Crate result type
pub type Result<T> = std::result::Result<T, Error>;

/// Runtime errors.
///
/// Contract violations inside the crate (duplicate descriptors, writes to
/// read-only settings, persisted keys without values) panic instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("type mismatch for {setting}: expected {expected}, found {found}")]
    TypeMismatch {
        setting: String,
        expected: ValueType,
        found: ValueType,
    },

    #[error("value {value} out of range for {setting}")]
    OutOfRange { setting: String, value: Value },

    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    #[error("config gateway rejected {key}: {message}")]
    Gateway { key: String, message: String },

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored state version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("no player is logged in")]
    NoActivePlayer,

    #[error("{0} does not accept overrides")]
    ZoneNotOverridable(ZoneId),
}
