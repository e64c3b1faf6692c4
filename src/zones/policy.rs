//! Which zones accept overrides.
//!
//! A zone accepts overrides when the host told us about it, it is not a
//! PvP zone, and its category is on the allowed list. Everything else is
//! excluded: overrides are never applied there and stray entries for it
//! are cleaned up on evaluation.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::config::{EngineConfig, ZoneInfo};
use crate::core::ids::{ZoneCategory, ZoneId};

/// Zone lookup plus the allowed-category rule.
#[derive(Clone, Debug, Default)]
pub struct ZonePolicy {
    zones: FxHashMap<ZoneId, ZoneInfo>,
    allowed: FxHashSet<ZoneCategory>,
}

impl ZonePolicy {
    /// Build from the engine configuration.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.zones.iter().cloned(), config.allowed_categories.iter().copied())
    }

    /// Build from a zone table and allowed categories.
    pub fn new(zones: impl IntoIterator<Item = ZoneInfo>, allowed: impl IntoIterator<Item = ZoneCategory>) -> Self {
        Self {
            zones: zones.into_iter().map(|z| (z.id, z)).collect(),
            allowed: allowed.into_iter().collect(),
        }
    }

    /// Zone info, if the host listed the zone.
    #[must_use]
    pub fn info(&self, zone: ZoneId) -> Option<&ZoneInfo> {
        self.zones.get(&zone)
    }

    /// Whether overrides may be applied in the zone.
    #[must_use]
    pub fn is_allowed(&self, zone: ZoneId) -> bool {
        self.zones
            .get(&zone)
            .is_some_and(|z| !z.pvp && self.allowed.contains(&z.category))
    }

    /// Zones that accept overrides, sorted by name then id.
    #[must_use]
    pub fn overridable_zones(&self) -> Vec<&ZoneInfo> {
        let mut zones: Vec<&ZoneInfo> = self.zones.values().filter(|z| self.is_allowed(z.id)).collect();
        zones.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        zones
    }
}
