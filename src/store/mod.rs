//! Snapshot store: baselines, zone overrides and overwritten flags.
//!
//! ## Contents
//!
//! - one System baseline (fully persisted)
//! - one UI baseline per player identity (fully persisted)
//! - zone -> override snapshot, per domain
//! - one overwritten flag per domain
//!
//! ## Safe baseline writes
//!
//! Baselines are refreshed from the live store whenever it changes
//! organically, but never while the domain is overwritten. Otherwise
//! override values would be captured as if they were the player's real
//! preferences. [`SnapshotStore::write_baseline_system_safe`] and
//! [`SnapshotStore::write_baseline_ui_safe`] enforce that guard.

pub mod backend;
pub mod layout;

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

pub use backend::{JsonFileBackend, MemoryBackend, StoreBackend};
pub use layout::{PersistedState, CURRENT_VERSION};

use crate::core::error::{Error, Result};
use crate::core::ids::{Domain, PlayerId, ZoneId};
use crate::gateway::ConfigGateway;
use crate::registry::SettingRegistry;
use crate::snapshot::{Snapshot, SnapshotBlob};

/// All snapshots and flags the engine persists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotStore {
    system_overwritten: bool,
    ui_overwritten: bool,
    original_system: Snapshot,
    original_ui: BTreeMap<PlayerId, Snapshot>,
    zone_system: BTreeMap<ZoneId, Snapshot>,
    zone_ui: BTreeMap<ZoneId, Snapshot>,
}

impl SnapshotStore {
    /// First-run store: System baseline read verbatim from the live store.
    pub fn from_live(registry: &SettingRegistry, gateway: &dyn ConfigGateway) -> Self {
        Self {
            system_overwritten: false,
            ui_overwritten: false,
            original_system: Snapshot::from_live(registry, Domain::System, gateway).persist_all(),
            original_ui: BTreeMap::new(),
            zone_system: BTreeMap::new(),
            zone_ui: BTreeMap::new(),
        }
    }

    /// Load from a backend, or start fresh if it holds nothing.
    ///
    /// Every stored snapshot is decoded on top of a fresh live-store read
    /// of its domain.
    pub fn load(
        backend: &dyn StoreBackend,
        registry: &SettingRegistry,
        gateway: &dyn ConfigGateway,
    ) -> Result<Self> {
        let Some(document) = backend.load()? else {
            info!("no stored state, capturing live settings as baseline");
            return Ok(Self::from_live(registry, gateway));
        };
        let state: PersistedState = serde_json::from_str(&document)?;
        Self::from_persisted(&state, registry, gateway)
    }

    /// Rebuild from the on-disk layout.
    pub fn from_persisted(
        state: &PersistedState,
        registry: &SettingRegistry,
        gateway: &dyn ConfigGateway,
    ) -> Result<Self> {
        if state.version > CURRENT_VERSION {
            return Err(Error::UnsupportedVersion {
                found: state.version,
                supported: CURRENT_VERSION,
            });
        }

        let live_system = Snapshot::from_live(registry, Domain::System, gateway);
        let live_ui = Snapshot::from_live(registry, Domain::Ui, gateway);
        let decode = |blob: &SnapshotBlob, live: &Snapshot| Snapshot::deserialize(blob, live.clone(), registry);

        Ok(Self {
            system_overwritten: state.system_overwritten,
            ui_overwritten: state.ui_overwritten,
            original_system: decode(&state.original_system, &live_system),
            original_ui: state
                .original_ui
                .iter()
                .map(|(&player, blob)| (PlayerId::new(player), decode(blob, &live_ui)))
                .collect(),
            zone_system: decode_overrides(Domain::System, &state.zone_system, |blob| decode(blob, &live_system)),
            zone_ui: decode_overrides(Domain::Ui, &state.zone_ui, |blob| decode(blob, &live_ui)),
        })
    }

    /// Encode into the on-disk layout.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            version: CURRENT_VERSION,
            system_overwritten: self.system_overwritten,
            ui_overwritten: self.ui_overwritten,
            original_system: self.original_system.serialize(),
            original_ui: self
                .original_ui
                .iter()
                .map(|(player, snapshot)| (player.raw(), snapshot.serialize()))
                .collect(),
            zone_system: self
                .zone_system
                .iter()
                .map(|(zone, snapshot)| (zone.raw(), snapshot.serialize()))
                .collect(),
            zone_ui: self
                .zone_ui
                .iter()
                .map(|(zone, snapshot)| (zone.raw(), snapshot.serialize()))
                .collect(),
        }
    }

    /// Write the whole store to a backend.
    pub fn save(&self, backend: &mut dyn StoreBackend) -> Result<()> {
        let document = serde_json::to_string_pretty(&self.to_persisted())?;
        backend.save(&document)
    }

    // === Flags ===

    /// Whether the live store currently reflects an override for `domain`.
    #[must_use]
    pub fn is_overwritten(&self, domain: Domain) -> bool {
        match domain {
            Domain::System => self.system_overwritten,
            Domain::Ui => self.ui_overwritten,
        }
    }

    /// Set the overwritten flag for `domain`.
    pub fn set_overwritten(&mut self, domain: Domain, overwritten: bool) {
        match domain {
            Domain::System => self.system_overwritten = overwritten,
            Domain::Ui => self.ui_overwritten = overwritten,
        }
    }

    // === Baselines ===

    /// The System baseline.
    #[must_use]
    pub fn system_baseline(&self) -> &Snapshot {
        &self.original_system
    }

    /// The UI baseline of a player.
    #[must_use]
    pub fn ui_baseline(&self, player: PlayerId) -> Option<&Snapshot> {
        self.original_ui.get(&player)
    }

    /// Baseline for a domain. UI baselines need a player.
    #[must_use]
    pub fn baseline(&self, domain: Domain, player: Option<PlayerId>) -> Option<&Snapshot> {
        match domain {
            Domain::System => Some(&self.original_system),
            Domain::Ui => player.and_then(|p| self.original_ui.get(&p)),
        }
    }

    /// Mutable baseline for a domain. UI baselines need a player.
    pub fn baseline_mut(&mut self, domain: Domain, player: Option<PlayerId>) -> Option<&mut Snapshot> {
        match domain {
            Domain::System => Some(&mut self.original_system),
            Domain::Ui => player.and_then(|p| self.original_ui.get_mut(&p)),
        }
    }

    /// Players with a stored UI baseline.
    pub fn known_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.original_ui.keys().copied()
    }

    /// Replace the System baseline with a fresh live read, unless the
    /// System domain is overwritten. Returns whether it wrote.
    pub fn write_baseline_system_safe(&mut self, registry: &SettingRegistry, gateway: &dyn ConfigGateway) -> bool {
        if self.system_overwritten {
            debug!("System settings are overwritten, not refreshing System baseline");
            return false;
        }
        debug!("refreshing System baseline from live settings");
        self.original_system = Snapshot::from_live(registry, Domain::System, gateway).persist_all();
        true
    }

    /// Replace a player's UI baseline with a fresh live read, unless the
    /// UI domain is overwritten. Returns whether it wrote.
    pub fn write_baseline_ui_safe(
        &mut self,
        player: PlayerId,
        registry: &SettingRegistry,
        gateway: &dyn ConfigGateway,
    ) -> bool {
        if self.ui_overwritten {
            debug!(%player, "UI settings are overwritten, not refreshing UI baseline");
            return false;
        }
        self.capture_ui_baseline(player, registry, gateway);
        true
    }

    /// Capture a player's UI baseline from the live store unconditionally.
    pub fn capture_ui_baseline(&mut self, player: PlayerId, registry: &SettingRegistry, gateway: &dyn ConfigGateway) {
        debug!(%player, "capturing UI baseline from live settings");
        let snapshot = Snapshot::from_live(registry, Domain::Ui, gateway).persist_all();
        self.original_ui.insert(player, snapshot);
    }

    // === Zone overrides ===

    fn overrides_mut(&mut self, domain: Domain) -> &mut BTreeMap<ZoneId, Snapshot> {
        match domain {
            Domain::System => &mut self.zone_system,
            Domain::Ui => &mut self.zone_ui,
        }
    }

    /// All overrides of a domain, by zone.
    #[must_use]
    pub fn overrides(&self, domain: Domain) -> &BTreeMap<ZoneId, Snapshot> {
        match domain {
            Domain::System => &self.zone_system,
            Domain::Ui => &self.zone_ui,
        }
    }

    /// Override of a domain for a zone.
    #[must_use]
    pub fn override_for(&self, domain: Domain, zone: ZoneId) -> Option<&Snapshot> {
        self.overrides(domain).get(&zone)
    }

    /// Whether a zone has an override in either domain.
    #[must_use]
    pub fn has_any_override(&self, zone: ZoneId) -> bool {
        Domain::ALL.iter().any(|&d| self.override_for(d, zone).is_some())
    }

    /// Store an override, replacing any previous one.
    ///
    /// Panics if the snapshot belongs to another domain.
    pub fn insert_override(&mut self, domain: Domain, zone: ZoneId, snapshot: Snapshot) {
        assert_eq!(snapshot.domain(), domain, "Override for {} stored under the wrong domain", zone);
        self.overrides_mut(domain).insert(zone, snapshot);
    }

    /// Remove an override.
    pub fn remove_override(&mut self, domain: Domain, zone: ZoneId) -> Option<Snapshot> {
        self.overrides_mut(domain).remove(&zone)
    }
}

/// Decode stored zone overrides, dropping any left with nothing persisted.
fn decode_overrides(
    domain: Domain,
    blobs: &BTreeMap<u16, SnapshotBlob>,
    decode: impl Fn(&SnapshotBlob) -> Snapshot,
) -> BTreeMap<ZoneId, Snapshot> {
    blobs
        .iter()
        .filter_map(|(&zone, blob)| {
            let zone = ZoneId::new(zone);
            let snapshot = decode(blob);
            if snapshot.has_any_persisted() {
                Some((zone, snapshot))
            } else {
                warn!(%domain, %zone, "dropping stored override with no usable settings");
                None
            }
        })
        .collect()
}
