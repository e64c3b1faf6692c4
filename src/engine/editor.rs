//! Operations the override editor calls.
//!
//! The editor works on clones: `load_or_create_override` hands out a copy,
//! the user edits it, and nothing reaches the store until
//! `save_override`. After saving, the host dispatches
//! `EngineEvent::ConfigurationSaved` so the current zone is re-evaluated.

use tracing::info;

use super::override_engine::OverrideEngine;
use crate::core::config::ZoneInfo;
use crate::core::error::{Error, Result};
use crate::core::ids::{Domain, ZoneId};
use crate::gateway::ConfigGateway;
use crate::snapshot::Snapshot;
use crate::store::StoreBackend;

/// A zone offered by the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverridableZone<'a> {
    pub info: &'a ZoneInfo,
    /// Has a System override.
    pub system: bool,
    /// Has a UI override.
    pub ui: bool,
}

impl<G: ConfigGateway, B: StoreBackend> OverrideEngine<G, B> {
    /// Zones that accept overrides, sorted by name then id.
    #[must_use]
    pub fn overridable_zones(&self) -> Vec<OverridableZone<'_>> {
        self.zones
            .overridable_zones()
            .into_iter()
            .map(|info| OverridableZone {
                info,
                system: self.state.store.override_for(Domain::System, info.id).is_some(),
                ui: self.state.store.override_for(Domain::Ui, info.id).is_some(),
            })
            .collect()
    }

    /// A copy of the zone's override, or a depersisted copy of the
    /// current baseline if there is none yet.
    pub fn load_or_create_override(&self, zone: ZoneId, domain: Domain) -> Result<Snapshot> {
        if !self.zones.is_allowed(zone) {
            return Err(Error::ZoneNotOverridable(zone));
        }
        if let Some(existing) = self.state.store.override_for(domain, zone) {
            return Ok(existing.clone());
        }
        self.state
            .store
            .baseline(domain, self.state.current_player)
            .map(|baseline| baseline.clone().depersist_all())
            .ok_or(Error::NoActivePlayer)
    }

    /// Store an edited override and save the store.
    ///
    /// An override without persisted settings is removed instead.
    /// Panics if the snapshot belongs to another domain.
    pub fn save_override(&mut self, zone: ZoneId, domain: Domain, snapshot: Snapshot) -> Result<()> {
        if !self.zones.is_allowed(zone) {
            return Err(Error::ZoneNotOverridable(zone));
        }
        if snapshot.has_any_persisted() {
            info!(%zone, %domain, "storing zone override");
            self.state.store.insert_override(domain, zone, snapshot);
        } else {
            info!(%zone, %domain, "override has no persisted settings, removing it");
            self.state.store.remove_override(domain, zone);
        }
        self.state.store.save(&mut self.backend)
    }

    /// Remove a zone's override and save the store.
    ///
    /// Returns whether there was one.
    pub fn delete_override(&mut self, zone: ZoneId, domain: Domain) -> Result<bool> {
        let removed = self.state.store.remove_override(domain, zone).is_some();
        if removed {
            info!(%zone, %domain, "deleted zone override");
            self.state.store.save(&mut self.backend)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::config::{EngineConfig, ZoneInfo};
    use crate::core::error::Error;
    use crate::core::ids::{Domain, PlayerId, ZoneCategory, ZoneId};
    use crate::core::value::Value;
    use crate::engine::{EngineEvent, OverrideEngine};
    use crate::gateway::{LiveValue, MemoryGateway};
    use crate::registry::{Descriptor, ExternalKey, SettingRegistry};
    use crate::store::MemoryBackend;

    const MASTER: Descriptor = Descriptor::uint("MasterVolume", ExternalKey::system("SoundMaster"), 0, 100);
    const MINIMAP: Descriptor = Descriptor::boolean("HudDisplayMinimap", ExternalKey::ui_control("NaviMapDisp"));

    const TOWN: ZoneId = ZoneId::new(100);
    const DUNGEON: ZoneId = ZoneId::new(300);

    fn engine() -> OverrideEngine<MemoryGateway, MemoryBackend> {
        let mut registry = SettingRegistry::new();
        registry.register(MASTER);
        registry.register(MINIMAP);
        let config = EngineConfig::new()
            .with_registry(registry)
            .with_zone(ZoneInfo::new(TOWN, "Town", ZoneCategory::TOWN))
            .with_zone(ZoneInfo::new(ZoneId::new(101), "Another Town", ZoneCategory::TOWN))
            .with_zone(ZoneInfo::new(DUNGEON, "Dungeon", ZoneCategory::DUNGEON));
        let gateway = MemoryGateway::new()
            .with_value(MASTER.key, LiveValue::UInt(80))
            .with_value(MINIMAP.key, LiveValue::Bool(true));
        OverrideEngine::start(config, gateway, MemoryBackend::new()).unwrap().0
    }

    #[test]
    fn test_new_override_is_depersisted_baseline() {
        let engine = engine();
        let snapshot = engine.load_or_create_override(TOWN, Domain::System).unwrap();
        assert_eq!(snapshot.read(&MASTER), Some(&Value::UInt(80)));
        assert!(!snapshot.has_any_persisted());
    }

    #[test]
    fn test_ui_override_needs_player() {
        let mut engine = engine();
        assert!(matches!(
            engine.load_or_create_override(TOWN, Domain::Ui),
            Err(Error::NoActivePlayer)
        ));

        engine.handle(EngineEvent::SessionStarted { player: PlayerId::new(1), zone: TOWN });
        let snapshot = engine.load_or_create_override(TOWN, Domain::Ui).unwrap();
        assert_eq!(snapshot.read(&MINIMAP), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_disallowed_zone_rejected() {
        let mut engine = engine();
        assert!(matches!(
            engine.load_or_create_override(DUNGEON, Domain::System),
            Err(Error::ZoneNotOverridable(z)) if z == DUNGEON
        ));
        let snapshot = engine.load_or_create_override(TOWN, Domain::System).unwrap();
        assert!(engine.save_override(DUNGEON, Domain::System, snapshot).is_err());
    }

    #[test]
    fn test_save_edit_and_delete() {
        let mut engine = engine();
        let mut snapshot = engine.load_or_create_override(TOWN, Domain::System).unwrap();
        snapshot.set_persistent(&MASTER, Value::UInt(40));

        // Unsaved edits stay out of the store.
        assert!(engine.store().override_for(Domain::System, TOWN).is_none());

        engine.save_override(TOWN, Domain::System, snapshot).unwrap();
        let zones = engine.overridable_zones();
        let names: Vec<&str> = zones.iter().map(|z| z.info.name.as_str()).collect();
        assert_eq!(names, vec!["Another Town", "Town"]);
        assert!(zones[1].system);
        assert!(!zones[1].ui);

        let reloaded = engine.load_or_create_override(TOWN, Domain::System).unwrap();
        assert_eq!(reloaded.read(&MASTER), Some(&Value::UInt(40)));

        assert!(engine.delete_override(TOWN, Domain::System).unwrap());
        assert!(!engine.delete_override(TOWN, Domain::System).unwrap());
    }

    #[test]
    fn test_depersisted_override_is_removed_on_save() {
        let mut engine = engine();
        let mut snapshot = engine.load_or_create_override(TOWN, Domain::System).unwrap();
        snapshot.set_persistent(&MASTER, Value::UInt(40));
        engine.save_override(TOWN, Domain::System, snapshot).unwrap();

        let mut edited = engine.load_or_create_override(TOWN, Domain::System).unwrap();
        edited.clear_persisted(&MASTER);
        engine.save_override(TOWN, Domain::System, edited).unwrap();

        assert!(engine.store().override_for(Domain::System, TOWN).is_none());
    }
}
