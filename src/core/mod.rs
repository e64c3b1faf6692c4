//! Core types: identifiers, setting values, errors, configuration.
//!
//! Nothing in here knows about snapshots or the engine; every other
//! module builds on these.

pub mod ids;
pub mod value;
pub mod error;
pub mod config;

pub use ids::{Domain, PlayerId, ZoneCategory, ZoneId};
pub use value::{EnumTypeId, ValidRange, Value, ValueType};
pub use error::{Error, Result};
pub use config::{EngineConfig, ZoneInfo, DEFAULT_NOTIFICATION_EXPIRY};
