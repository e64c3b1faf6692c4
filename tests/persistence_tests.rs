//! Persistence tests.
//!
//! These tests verify the at-rest behaviour of the snapshot store:
//! - Overrides survive a restart through the JSON file backend
//! - Only persisted settings are written, enumerations as numbers
//! - Overrides emptied in the editor are deleted, not stored
//! - Stored overrides left without usable settings are dropped on load
//! - Newer or corrupt documents are rejected instead of overwritten
//! - Save failures are reported without stopping the engine

use std::fs;
use std::path::Path;

use zone_settings::engine::{EngineEvent, Notification, OverrideEngine};
use zone_settings::gateway::{LiveValue, MemoryGateway};
use zone_settings::registry::catalog::{self, enums};
use zone_settings::registry::{Descriptor, SettingId};
use zone_settings::store::{JsonFileBackend, MemoryBackend, PersistedState, CURRENT_VERSION};
use zone_settings::{Domain, EngineConfig, Error, PlayerId, Value, ZoneCategory, ZoneId, ZoneInfo};

const PLAYER: PlayerId = PlayerId::new(3);
const TOWN: ZoneId = ZoneId::new(100);

fn setting(name: &'static str) -> Descriptor {
    *catalog::builtin().describe(SettingId(name))
}

fn config() -> EngineConfig {
    EngineConfig::new().with_zone(ZoneInfo::new(TOWN, "Gridania", ZoneCategory::TOWN))
}

fn gateway() -> MemoryGateway {
    MemoryGateway::new()
        .with_value(setting("MasterVolume").key, LiveValue::UInt(80))
        .with_value(setting("BgmVolume").key, LiveValue::UInt(60))
        .with_value(setting("SoundEqualizerMode").key, LiveValue::UInt(0))
        .with_value(setting("HudDisplayMinimap").key, LiveValue::Bool(true))
}

fn read_state(path: &Path) -> PersistedState {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_overrides_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zone-settings").join("state.json");

    let (mut engine, _) = OverrideEngine::start(config(), gateway(), JsonFileBackend::new(&path)).unwrap();
    let mut snapshot = engine.load_or_create_override(TOWN, Domain::System).unwrap();
    snapshot.set_persistent(&setting("MasterVolume"), Value::UInt(40));
    snapshot.set_persistent(&setting("SoundEqualizerMode"), Value::Enum(enums::SOUND_EQUALIZER, 3));
    engine.save_override(TOWN, Domain::System, snapshot).unwrap();
    drop(engine);

    let state = read_state(&path);
    assert_eq!(state.version, CURRENT_VERSION);
    let zone = &state.zone_system[&TOWN.raw()];
    assert_eq!(zone.len(), 2);
    assert_eq!(zone["MasterVolume"], serde_json::json!(40));
    assert_eq!(zone["SoundEqualizerMode"], serde_json::json!(3));

    let (mut engine, notes) = OverrideEngine::start(config(), gateway(), JsonFileBackend::new(&path)).unwrap();
    assert!(notes.is_empty());
    let restored = engine.store().override_for(Domain::System, TOWN).unwrap();
    assert!(restored.is_persisted(&setting("MasterVolume")));
    assert!(!restored.is_persisted(&setting("BgmVolume")));
    assert_eq!(restored.read(&setting("BgmVolume")), Some(&Value::UInt(60)));

    engine.handle(EngineEvent::SessionStarted { player: PLAYER, zone: TOWN });
    assert_eq!(engine.gateway().get(setting("SoundEqualizerMode").key), Some(&LiveValue::UInt(3)));
}

#[test]
fn test_player_baselines_are_keyed_by_identity() {
    let mut engine = OverrideEngine::start(config(), gateway(), MemoryBackend::new()).unwrap().0;
    engine.handle(EngineEvent::SessionStarted { player: PLAYER, zone: TOWN });
    engine.handle(EngineEvent::SessionEnded);
    engine.handle(EngineEvent::SessionStarted { player: PlayerId::new(4), zone: TOWN });

    let state: PersistedState = serde_json::from_str(engine.backend().document().unwrap()).unwrap();
    assert_eq!(state.original_ui.keys().copied().collect::<Vec<_>>(), vec![3, 4]);
    assert_eq!(state.original_ui[&3]["HudDisplayMinimap"], serde_json::json!(true));
}

#[test]
fn test_emptied_override_is_deleted() {
    let mut engine = OverrideEngine::start(config(), gateway(), MemoryBackend::new()).unwrap().0;
    let master = setting("MasterVolume");

    let mut snapshot = engine.load_or_create_override(TOWN, Domain::System).unwrap();
    snapshot.set_persistent(&master, Value::UInt(40));
    engine.save_override(TOWN, Domain::System, snapshot).unwrap();

    let mut snapshot = engine.load_or_create_override(TOWN, Domain::System).unwrap();
    snapshot.clear_persisted(&master);
    engine.save_override(TOWN, Domain::System, snapshot).unwrap();

    let state: PersistedState = serde_json::from_str(engine.backend().document().unwrap()).unwrap();
    assert!(state.zone_system.is_empty());
    assert!(engine.overridable_zones().iter().all(|z| !z.system));
}

#[test]
fn test_bad_entries_fall_back_to_live_values() {
    let document = serde_json::json!({
        "version": 1,
        "zone_system": {
            "100": { "MasterVolume": 70, "BgmVolume": "loud", "RemovedSetting": 1 }
        }
    });
    let backend = MemoryBackend::with_document(document.to_string());
    let engine = OverrideEngine::start(config(), gateway(), backend).unwrap().0;

    let zone = engine.store().override_for(Domain::System, TOWN).unwrap();
    assert_eq!(zone.persisted_ids().collect::<Vec<_>>(), vec![SettingId("MasterVolume")]);
    assert_eq!(zone.read(&setting("MasterVolume")), Some(&Value::UInt(70)));
    assert_eq!(zone.read(&setting("BgmVolume")), Some(&Value::UInt(60)));
}

#[test]
fn test_override_without_usable_settings_is_dropped() {
    let document = serde_json::json!({
        "version": 1,
        "zone_system": { "100": { "BgmVolume": "loud" } }
    });
    let backend = MemoryBackend::with_document(document.to_string());
    let mut engine = OverrideEngine::start(config(), gateway(), backend).unwrap().0;
    assert!(engine.store().override_for(Domain::System, TOWN).is_none());

    let notes = engine.handle(EngineEvent::SessionStarted { player: PLAYER, zone: TOWN });
    assert!(notes.is_empty());
    assert!(!engine.store().is_overwritten(Domain::System));

    let state: PersistedState = serde_json::from_str(engine.backend().document().unwrap()).unwrap();
    assert!(state.zone_system.is_empty());
}

#[test]
fn test_newer_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, r#"{ "version": 2, "system_overwritten": true }"#).unwrap();

    let result = OverrideEngine::start(config(), gateway(), JsonFileBackend::new(&path));
    assert!(matches!(result, Err(Error::UnsupportedVersion { found: 2, supported: 1 })));
    assert!(fs::read_to_string(&path).unwrap().contains("\"version\": 2"));
}

#[test]
fn test_corrupt_document_is_rejected() {
    let backend = MemoryBackend::with_document("{\"version\": 1, \"zone_system\": [");
    let result = OverrideEngine::start(config(), gateway(), backend);
    assert!(matches!(result, Err(Error::Serialization(_))));
}

#[test]
fn test_save_failure_is_reported() {
    let mut backend = MemoryBackend::new();
    backend.set_fail_saves(true);

    let (mut engine, notes) = OverrideEngine::start(config(), gateway(), backend).unwrap();
    assert!(matches!(notes.as_slice(), [Notification::PersistenceFailed(_)]));

    let mut snapshot = engine.load_or_create_override(TOWN, Domain::System).unwrap();
    snapshot.set_persistent(&setting("MasterVolume"), Value::UInt(40));
    assert!(matches!(
        engine.save_override(TOWN, Domain::System, snapshot),
        Err(Error::Persistence(_))
    ));

    let notes = engine.handle(EngineEvent::SessionStarted { player: PLAYER, zone: TOWN });
    assert_eq!(notes.len(), 2);
    assert!(matches!(notes[0], Notification::PersistenceFailed(_)));
    assert_eq!(notes[1], Notification::Modified);
    assert_eq!(engine.gateway().get(setting("MasterVolume").key), Some(&LiveValue::UInt(40)));
}
