//! Engine configuration.
//!
//! Hosts configure the engine at startup by providing:
//! - `ZoneInfo`: one entry per zone the host knows about (name, category, PvP)
//! - the zone categories that accept overrides
//! - the setting registry (the built-in catalog unless replaced)
//! - `EngineConfig`: combines all configuration
//!
//! The engine never hardcodes zones. Anything not in the zone table is
//! treated as unknown and never receives an override.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ids::{ZoneCategory, ZoneId};
use crate::registry::{catalog, SettingRegistry};

/// Default lifetime of a notification toast.
pub const DEFAULT_NOTIFICATION_EXPIRY: Duration = Duration::from_secs(5);

/// What the host tells us about one zone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneInfo {
    /// Zone identifier.
    pub id: ZoneId,

    /// Display name, used to order the editor's zone list.
    pub name: String,

    /// Intended-use category.
    pub category: ZoneCategory,

    /// PvP zones never accept overrides, whatever their category.
    pub pvp: bool,
}

impl ZoneInfo {
    /// Create a new zone entry.
    pub fn new(id: ZoneId, name: impl Into<String>, category: ZoneCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            pvp: false,
        }
    }

    /// Mark the zone as PvP.
    #[must_use]
    pub fn pvp(mut self) -> Self {
        self.pvp = true;
        self
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Zone table.
    pub zones: Vec<ZoneInfo>,

    /// Zone categories that accept overrides.
    pub allowed_categories: Vec<ZoneCategory>,

    /// How long notifications stay on screen.
    pub notification_expiry: Duration,

    /// Settings the engine manages.
    pub registry: SettingRegistry,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a configuration with the default categories and the built-in catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zones: Vec::new(),
            allowed_categories: ZoneCategory::default_allowed().to_vec(),
            notification_expiry: DEFAULT_NOTIFICATION_EXPIRY,
            registry: catalog::builtin(),
        }
    }

    /// Add a zone.
    #[must_use]
    pub fn with_zone(mut self, zone: ZoneInfo) -> Self {
        self.zones.push(zone);
        self
    }

    /// Add several zones.
    #[must_use]
    pub fn with_zones(mut self, zones: impl IntoIterator<Item = ZoneInfo>) -> Self {
        self.zones.extend(zones);
        self
    }

    /// Allow one more category.
    #[must_use]
    pub fn with_allowed_category(mut self, category: ZoneCategory) -> Self {
        if !self.allowed_categories.contains(&category) {
            self.allowed_categories.push(category);
        }
        self
    }

    /// Replace the allowed categories.
    #[must_use]
    pub fn with_allowed_categories(mut self, categories: impl IntoIterator<Item = ZoneCategory>) -> Self {
        self.allowed_categories = categories.into_iter().collect();
        self
    }

    /// Set the notification expiry.
    #[must_use]
    pub fn with_notification_expiry(mut self, expiry: Duration) -> Self {
        self.notification_expiry = expiry;
        self
    }

    /// Use a custom registry instead of the built-in catalog.
    #[must_use]
    pub fn with_registry(mut self, registry: SettingRegistry) -> Self {
        self.registry = registry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_info_builder() {
        let zone = ZoneInfo::new(ZoneId::new(376), "Borderland Ruins", ZoneCategory::FRONTLINE).pvp();
        assert_eq!(zone.name, "Borderland Ruins");
        assert!(zone.pvp);

        let town = ZoneInfo::new(ZoneId::new(129), "Limsa Lominsa Lower Decks", ZoneCategory::TOWN);
        assert!(!town.pvp);
    }

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::new();
        assert_eq!(config.notification_expiry, Duration::from_secs(5));
        assert!(config.allowed_categories.contains(&ZoneCategory::TOWN));
        assert!(!config.allowed_categories.contains(&ZoneCategory::DUNGEON));
        assert!(!config.registry.is_empty());
    }

    #[test]
    fn test_engine_config_builder() {
        let config = EngineConfig::new()
            .with_zone(ZoneInfo::new(ZoneId::new(1), "A", ZoneCategory::TOWN))
            .with_zones([ZoneInfo::new(ZoneId::new(2), "B", ZoneCategory::DUNGEON)])
            .with_allowed_categories([ZoneCategory::TOWN])
            .with_allowed_category(ZoneCategory::DUNGEON)
            .with_allowed_category(ZoneCategory::DUNGEON)
            .with_notification_expiry(Duration::from_secs(1))
            .with_registry(SettingRegistry::new());

        assert_eq!(config.zones.len(), 2);
        assert_eq!(config.allowed_categories, vec![ZoneCategory::TOWN, ZoneCategory::DUNGEON]);
        assert_eq!(config.notification_expiry, Duration::from_secs(1));
        assert!(config.registry.is_empty());
        assert!(config.zones.iter().any(|z| z.id == ZoneId::new(2)));
    }
}
