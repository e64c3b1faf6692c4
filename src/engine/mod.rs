//! The override engine and its collaborators.
//!
//! ## Key Types
//!
//! - `OverrideEngine`: owns the state and handles one `EngineEvent` at a time
//! - `EngineState`: current zone, current player, snapshot store
//! - `Notification`: what the user is told after an event
//! - `OverridableZone`: an entry of the editor's zone list

pub mod events;
pub mod state;
pub mod override_engine;
pub mod reconcile;
pub mod editor;

pub use events::{EngineEvent, Notification, Notifications, Outcome};
pub use state::EngineState;
pub use override_engine::OverrideEngine;
pub use editor::OverridableZone;
