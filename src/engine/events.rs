//! Engine input events and user-facing notifications.
//!
//! The host translates its own callbacks (login, logout, territory
//! change, settings change, editor save, unload) into `EngineEvent`s and
//! feeds them to `OverrideEngine::handle` one at a time. Whatever the
//! user should see comes back as `Notification`s.

use smallvec::SmallVec;

use crate::core::ids::{PlayerId, ZoneId};
use crate::gateway::ConfigChange;

/// Something the host observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    /// A character logged in, currently standing in `zone`.
    SessionStarted { player: PlayerId, zone: ZoneId },

    /// The character logged out.
    SessionEnded,

    /// The player moved to another zone.
    ZoneChanged(ZoneId),

    /// One live setting changed.
    ConfigChanged(ConfigChange),

    /// The editor stored or deleted an override.
    ConfigurationSaved,

    /// The host is unloading the engine.
    Shutdown,
}

/// What a zone evaluation did to one domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Outcome {
    /// Nothing changed.
    #[default]
    None,
    /// The baseline was written back.
    Original,
    /// An override was applied.
    Modified,
}

impl Outcome {
    /// Combine the outcomes of both domains. `Modified` wins over `Original`.
    #[must_use]
    pub fn combine(self, other: Outcome) -> Outcome {
        self.max(other)
    }

    /// The notification for this outcome, if any.
    #[must_use]
    pub fn notification(self) -> Option<Notification> {
        match self {
            Outcome::None => None,
            Outcome::Original => Some(Notification::Restored),
            Outcome::Modified => Some(Notification::Modified),
        }
    }
}

/// Something the user should be told about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// A zone override was applied.
    Modified,

    /// Original settings were written back.
    Restored,

    /// Stored flags claim an override is active, found at startup.
    InconsistentState { system: bool, ui: bool },

    /// Writing the store failed.
    PersistenceFailed(String),
}

impl Notification {
    /// Short title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Notification::Modified => "Configuration Modified",
            Notification::Restored => "Configuration Restored",
            Notification::InconsistentState { .. } => "Configuration State Uncertain",
            Notification::PersistenceFailed(_) => "Saving Failed",
        }
    }

    /// Body text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Notification::Modified => "Zone configuration applied".to_string(),
            Notification::Restored => "Game configuration data restored".to_string(),
            Notification::InconsistentState { system, ui } => {
                let which = match (*system, *ui) {
                    (true, true) => "System and UI settings",
                    (true, false) => "System settings",
                    _ => "UI settings",
                };
                format!(
                    "{} were still overwritten when the add-on last stopped. \
                     They will be restored when you leave the current zone.",
                    which
                )
            }
            Notification::PersistenceFailed(reason) => format!("Could not save settings: {}", reason),
        }
    }
}

/// Notifications produced by one event.
pub type Notifications = SmallVec<[Notification; 2]>;
