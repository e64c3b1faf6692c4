//! # zone-settings
//!
//! Per-zone overrides for game client settings that never lose the
//! player's own configuration.
//!
//! ## Design Principles
//!
//! 1. **Nothing Is Lost**: the live store either matches the stored
//!    baseline or a zone override, and a per-domain flag says which.
//!    The flag is set before override values are written and cleared only
//!    after the baseline was written back.
//!
//! 2. **Explicit Persistence**: a snapshot value is only written to disk
//!    and back to the live store when it is marked persisted. Everything
//!    else is an ephemeral mirror of the live store.
//!
//! 3. **Host-Driven**: the host turns its callbacks into `EngineEvent`s.
//!    The engine has no globals and can be driven with synthetic events.
//!
//! ## Architecture
//!
//! - **Descriptor Table**: settings are plain data (`Descriptor`), looked
//!   up by id or by the client's external key.
//!
//! - **Persistent Data Structures**: snapshot values live in `im` maps, so
//!   cloning for the editor is O(1).
//!
//! ## Modules
//!
//! - `core`: identifiers, values, errors, configuration
//! - `registry`: setting descriptors and the built-in catalog
//! - `snapshot`: configuration snapshots, applying and encoding them
//! - `gateway`: access to the live settings store
//! - `store`: baselines, overrides, flags and their persistence
//! - `zones`: which zones accept overrides
//! - `engine`: the override engine, reconciliation, editor operations

pub mod core;
pub mod registry;
pub mod snapshot;
pub mod gateway;
pub mod store;
pub mod zones;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Domain, PlayerId, ZoneCategory, ZoneId,
    EnumTypeId, ValidRange, Value, ValueType,
    Error, Result,
    EngineConfig, ZoneInfo,
};

pub use crate::registry::{Descriptor, ExternalKey, KeySection, SettingId, SettingRegistry};

pub use crate::snapshot::{ApplyReport, Snapshot, SnapshotBlob};

pub use crate::gateway::{ConfigChange, ConfigGateway, LiveKind, LiveValue, MemoryGateway};

pub use crate::store::{JsonFileBackend, MemoryBackend, PersistedState, SnapshotStore, StoreBackend};

pub use crate::zones::ZonePolicy;

pub use crate::engine::{
    EngineEvent, EngineState, Notification, Notifications,
    OverridableZone, OverrideEngine, Outcome,
};
