//! On-disk layout of the snapshot store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::snapshot::SnapshotBlob;

/// Current layout version, incremented on breaking changes.
pub const CURRENT_VERSION: u32 = 1;

/// Everything the store persists, as one JSON document.
///
/// Snapshot entries are sparse: only persisted settings appear.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub version: u32,

    /// Live System settings currently reflect an override.
    pub system_overwritten: bool,

    /// Live UI settings currently reflect an override.
    pub ui_overwritten: bool,

    pub original_system: SnapshotBlob,

    /// Keyed by player identity.
    pub original_ui: BTreeMap<u64, SnapshotBlob>,

    /// Keyed by zone id.
    pub zone_system: BTreeMap<u16, SnapshotBlob>,

    /// Keyed by zone id.
    pub zone_ui: BTreeMap<u16, SnapshotBlob>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_keys_round_trip_as_json() {
        let mut state = PersistedState {
            version: CURRENT_VERSION,
            system_overwritten: true,
            ..PersistedState::default()
        };
        let mut blob = SnapshotBlob::new();
        blob.insert("MasterVolume".into(), json!(40));
        state.zone_system.insert(100, blob);

        let text = serde_json::to_string(&state).unwrap();
        let back: PersistedState = serde_json::from_str(&text).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_missing_fields_default() {
        let state: PersistedState = serde_json::from_str(r#"{ "version": 1 }"#).unwrap();
        assert!(!state.system_overwritten);
        assert!(state.original_ui.is_empty());
    }
}
