//! Zone policy.
//!
//! Zones are **host-configured**, not hardcoded. The host describes its
//! zones via `ZoneInfo` at startup and the policy decides which of them
//! accept overrides.

pub mod policy;

pub use policy::ZonePolicy;

// Re-export zone types from core for convenience
pub use crate::core::config::ZoneInfo;
pub use crate::core::ids::{ZoneCategory, ZoneId};
