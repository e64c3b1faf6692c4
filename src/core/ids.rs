//! Identifiers shared across the crate.
//!
//! ## Domain
//!
//! The client keeps two independent families of settings: system-wide
//! ones (sound, graphics, screenshots) and per-character UI ones (HUD,
//! controls, battle effects). Every snapshot, flag and override belongs
//! to exactly one domain.
//!
//! ## ZoneId / ZoneCategory / PlayerId
//!
//! Opaque identifiers handed to us by the host. The engine never
//! interprets them beyond equality and ordering.

use serde::{Deserialize, Serialize};

/// One of the two setting families tracked independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Domain {
    /// Client-wide settings, one baseline per installation.
    System,
    /// Character settings, one baseline per player identity.
    Ui,
}

impl Domain {
    /// Both domains, in evaluation order.
    pub const ALL: [Domain; 2] = [Domain::System, Domain::Ui];
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::System => write!(f, "System"),
            Domain::Ui => write!(f, "UI"),
        }
    }
}

/// Zone (territory) identifier for the player's current area.
///
/// The unit of override selection: each zone maps to zero or one
/// override snapshot per domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneId(pub u16);

impl ZoneId {
    /// Create a new zone ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Zone({})", self.0)
    }
}

/// Intended-use category of a zone (town, open world, dungeon, ...).
///
/// Overrides are only offered for zones whose category is allowed by
/// the engine configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneCategory(pub u32);

impl ZoneCategory {
    pub const TOWN: Self = Self(0);
    pub const OPEN_WORLD: Self = Self(1);
    pub const INN: Self = Self(2);
    pub const DUNGEON: Self = Self(3);
    pub const TRIAL: Self = Self(10);
    pub const HOUSING_AREA: Self = Self(13);
    pub const RAIDS: Self = Self(16);
    pub const FRONTLINE: Self = Self(18);
    pub const CHOCOBO_SQUARE: Self = Self(19);
    pub const GOLD_SAUCER: Self = Self(23);
    pub const FREE_COMPANY_GARRISON: Self = Self(30);
    pub const TREASURE_MAP_INSTANCE: Self = Self(33);
    pub const EUREKA: Self = Self(41);
    pub const LEAP_OF_FAITH: Self = Self(44);
    pub const MASKED_CARNIVAL: Self = Self(45);
    pub const OCEAN_FISHING: Self = Self(46);
    pub const BOZJA: Self = Self(48);
    pub const COSMIC_EXPLORATION: Self = Self(60);

    /// Create a new category.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Categories that accept overrides unless configured otherwise.
    #[must_use]
    pub fn default_allowed() -> [ZoneCategory; 14] {
        [
            Self::TOWN,
            Self::OPEN_WORLD,
            Self::INN,
            Self::HOUSING_AREA,
            Self::CHOCOBO_SQUARE,
            Self::GOLD_SAUCER,
            Self::FREE_COMPANY_GARRISON,
            Self::TREASURE_MAP_INSTANCE,
            Self::EUREKA,
            Self::LEAP_OF_FAITH,
            Self::MASKED_CARNIVAL,
            Self::OCEAN_FISHING,
            Self::BOZJA,
            Self::COSMIC_EXPLORATION,
        ]
    }
}

/// Identity of the logged-in character (the host's content id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({})", self.0)
    }
}
