//! At-rest encoding of snapshots.
//!
//! Only persisted settings are written, as a JSON object of
//! `setting id -> scalar`. Decoding always starts from a snapshot freshly
//! read from the live store and overlays the stored keys on top, so a
//! decoded snapshot is complete even when the blob is sparse or was
//! written before new settings were added to the registry.

use tracing::{debug, trace, warn};

use super::Snapshot;
use crate::core::value::Value;
use crate::registry::SettingRegistry;

/// Sparse at-rest form of a snapshot.
pub type SnapshotBlob = serde_json::Map<String, serde_json::Value>;

impl Snapshot {
    /// Encode the persisted settings.
    ///
    /// Panics if a persisted setting has no value.
    #[must_use]
    pub fn serialize(&self) -> SnapshotBlob {
        let mut blob = SnapshotBlob::new();
        for id in self.persisted.iter() {
            let Some(value) = self.values.get(id) else {
                panic!("Persisted setting {} has no value", id);
            };
            trace!(setting = %id, "serialising persisted setting");
            blob.insert(id.name().to_string(), value.to_json());
        }
        blob
    }

    /// Decode a blob on top of `fallback`.
    ///
    /// Every stored setting is marked persisted. Entries naming an unknown
    /// setting or a setting of the other domain, and entries holding a
    /// value of the wrong type, are dropped with a warning and keep the
    /// fallback value.
    ///
    /// Values outside the descriptor's range are kept. The range bounds
    /// editor input, while baselines hold whatever the live store held.
    #[must_use]
    pub fn deserialize(blob: &SnapshotBlob, fallback: Snapshot, registry: &SettingRegistry) -> Snapshot {
        let mut snapshot = fallback;
        for (name, json) in blob {
            let descriptor = match registry.resolve(name) {
                Ok(d) if d.domain() == snapshot.domain => d,
                Ok(_) => {
                    warn!(setting = %name, domain = %snapshot.domain, "dropping stored setting of the other domain");
                    continue;
                }
                Err(err) => {
                    warn!(error = %err, "dropping stored setting");
                    continue;
                }
            };
            let Some(value) = Value::from_json(json, descriptor.value_type) else {
                warn!(setting = %name, stored = %json, expected = %descriptor.value_type, "dropping stored setting of wrong type");
                continue;
            };
            if !descriptor.range.contains(&value) {
                debug!(setting = %name, %value, "keeping stored setting outside input range");
            }
            trace!(setting = %name, "deserialising persisted setting");
            snapshot.insert(descriptor, value);
            snapshot.persisted.insert(descriptor.id);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::Domain;
    use crate::registry::{Descriptor, ExternalKey};
    use proptest::prelude::*;
    use serde_json::json;

    const MASTER: Descriptor = Descriptor::uint("MasterVolume", ExternalKey::system("SoundMaster"), 0, 100);
    const BGM: Descriptor = Descriptor::uint("BgmVolume", ExternalKey::system("SoundBgm"), 0, 100);
    const INACTIVE: Descriptor = Descriptor::boolean("PlaySoundsWhenInactiveAll", ExternalKey::system("IsSoundAlways"));
    const SHOTS: Descriptor = Descriptor::string("ScreenshotLocationDir", ExternalKey::system("ScreenShotDir"), 20, 200);
    const MINIMAP: Descriptor = Descriptor::boolean("HudDisplayMinimap", ExternalKey::ui_control("NaviMapDisp"));

    fn registry() -> SettingRegistry {
        let mut registry = SettingRegistry::new();
        for d in [MASTER, BGM, INACTIVE, SHOTS, MINIMAP] {
            registry.register(d);
        }
        registry
    }

    fn live_baseline() -> Snapshot {
        let mut snapshot = Snapshot::new(Domain::System);
        snapshot.set_ephemeral(&MASTER, Value::UInt(80));
        snapshot.set_ephemeral(&BGM, Value::UInt(60));
        snapshot.set_ephemeral(&INACTIVE, Value::Bool(false));
        snapshot.set_ephemeral(&SHOTS, Value::from("C:/shots"));
        snapshot
    }

    #[test]
    fn test_serialize_is_sparse() {
        let mut snapshot = live_baseline();
        snapshot.set_persistent(&MASTER, Value::UInt(40));

        let blob = snapshot.serialize();
        assert_eq!(blob.len(), 1);
        assert_eq!(blob.get("MasterVolume"), Some(&json!(40)));
    }

    #[test]
    fn test_deserialize_overlays_fallback() {
        let blob: SnapshotBlob = serde_json::from_value(json!({ "MasterVolume": 40 })).unwrap();
        let snapshot = Snapshot::deserialize(&blob, live_baseline(), &registry());

        assert_eq!(snapshot.read(&MASTER), Some(&Value::UInt(40)));
        assert!(snapshot.is_persisted(&MASTER));
        assert_eq!(snapshot.read(&BGM), Some(&Value::UInt(60)));
        assert!(!snapshot.is_persisted(&BGM));
    }

    #[test]
    fn test_deserialize_drops_bad_entries() {
        let blob: SnapshotBlob = serde_json::from_value(json!({
            "MasterVolume": "loud",
            "BgmVolume": -4,
            "RemovedSetting": true,
            "HudDisplayMinimap": false,
            "PlaySoundsWhenInactiveAll": true,
        }))
        .unwrap();
        let snapshot = Snapshot::deserialize(&blob, live_baseline(), &registry());

        assert_eq!(snapshot.persisted_ids().collect::<Vec<_>>(), vec![INACTIVE.id]);
        assert_eq!(snapshot.read(&MASTER), Some(&Value::UInt(80)));
        assert_eq!(snapshot.read(&BGM), Some(&Value::UInt(60)));
        assert_eq!(snapshot.read(&MINIMAP), None);
    }

    #[test]
    fn test_out_of_range_values_are_kept() {
        let mut snapshot = live_baseline();
        snapshot.set_persistent(&SHOTS, Value::from(""));
        snapshot.set_persistent(&BGM, Value::UInt(400));

        let decoded = Snapshot::deserialize(&snapshot.serialize(), live_baseline(), &registry());
        assert!(decoded.is_persisted(&SHOTS));
        assert_eq!(decoded.read(&SHOTS), Some(&Value::from("")));
        assert!(decoded.is_persisted(&BGM));
        assert_eq!(decoded.read(&BGM), Some(&Value::UInt(400)));
    }

    #[test]
    #[should_panic(expected = "has no value")]
    fn test_persisted_without_value_panics() {
        let mut snapshot = Snapshot::new(Domain::System);
        snapshot.persisted.insert(MASTER.id);
        let _ = snapshot.serialize();
    }

    proptest! {
        #[test]
        fn prop_round_trip_keeps_persisted_values(
            master in proptest::option::of(0u32..=100),
            bgm in proptest::option::of(0u32..=100),
            inactive in proptest::option::of(any::<bool>()),
            shots in proptest::option::of("[a-z/]{3,20}"),
        ) {
            let mut snapshot = live_baseline();
            if let Some(v) = master { snapshot.set_persistent(&MASTER, Value::UInt(v)); }
            if let Some(v) = bgm { snapshot.set_persistent(&BGM, Value::UInt(v)); }
            if let Some(v) = inactive { snapshot.set_persistent(&INACTIVE, Value::Bool(v)); }
            if let Some(v) = shots { snapshot.set_persistent(&SHOTS, Value::Str(v)); }

            let decoded = Snapshot::deserialize(&snapshot.serialize(), live_baseline(), &registry());

            for id in snapshot.persisted_ids() {
                let d = *registry().describe(id);
                prop_assert!(decoded.is_persisted(&d));
                prop_assert_eq!(decoded.read(&d), snapshot.read(&d));
            }
        }
    }
}
