//! Mutable engine state.

use crate::core::ids::{PlayerId, ZoneId};
use crate::store::SnapshotStore;

/// Everything the engine mutates while handling events.
///
/// Only the engine's event handlers touch it; nothing here is global.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineState {
    /// Zone the player is in, once known.
    pub current_zone: Option<ZoneId>,

    /// Logged-in character, if any.
    pub current_player: Option<PlayerId>,

    /// Baselines, overrides and flags.
    pub store: SnapshotStore,
}

impl EngineState {
    /// State before any session has started.
    #[must_use]
    pub fn new(store: SnapshotStore) -> Self {
        Self {
            current_zone: None,
            current_player: None,
            store,
        }
    }

    /// Whether a character is logged in.
    #[must_use]
    pub fn in_session(&self) -> bool {
        self.current_player.is_some()
    }
}
