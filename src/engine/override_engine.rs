//! The override engine.
//!
//! ## States
//!
//! Per domain the live store is either at the baseline (flag clear) or
//! holds the override of the zone last entered (flag set).
//!
//! ## Ordering
//!
//! The flag is set and persisted *before* override values are written,
//! and cleared only *after* the baseline was written back without a
//! failure. A crash in between leaves the flag set, which the next start
//! reports as [`Notification::InconsistentState`].
//!
//! ## Usage
//!
//! ```
//! use zone_settings::core::{EngineConfig, PlayerId, ZoneCategory, ZoneId, ZoneInfo};
//! use zone_settings::engine::{EngineEvent, Notification, OverrideEngine};
//! use zone_settings::gateway::{LiveValue, MemoryGateway};
//! use zone_settings::registry::{Descriptor, ExternalKey, SettingRegistry};
//! use zone_settings::store::MemoryBackend;
//! use zone_settings::Value;
//!
//! const MASTER: Descriptor = Descriptor::uint("MasterVolume", ExternalKey::system("SoundMaster"), 0, 100);
//!
//! let mut registry = SettingRegistry::new();
//! registry.register(MASTER);
//! let config = EngineConfig::new()
//!     .with_registry(registry)
//!     .with_zone(ZoneInfo::new(ZoneId::new(100), "Limsa Lominsa", ZoneCategory::TOWN))
//!     .with_zone(ZoneInfo::new(ZoneId::new(200), "Middle La Noscea", ZoneCategory::OPEN_WORLD));
//! let gateway = MemoryGateway::new().with_value(MASTER.key, LiveValue::UInt(80));
//!
//! let (mut engine, _) = OverrideEngine::start(config, gateway, MemoryBackend::new()).unwrap();
//! engine.handle(EngineEvent::SessionStarted { player: PlayerId::new(1), zone: ZoneId::new(200) });
//!
//! let mut quiet = engine.load_or_create_override(ZoneId::new(100), MASTER.domain()).unwrap();
//! quiet.set_persistent(&MASTER, Value::UInt(40));
//! engine.save_override(ZoneId::new(100), MASTER.domain(), quiet).unwrap();
//!
//! let notes = engine.handle(EngineEvent::ZoneChanged(ZoneId::new(100)));
//! assert_eq!(notes.as_slice(), &[Notification::Modified]);
//! assert_eq!(engine.gateway().get(MASTER.key), Some(&LiveValue::UInt(40)));
//! ```

use std::time::Duration;

use tracing::{debug, info, warn};

use super::events::{EngineEvent, Notification, Notifications, Outcome};
use super::reconcile;
use super::state::EngineState;
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::ids::{Domain, PlayerId, ZoneId};
use crate::gateway::ConfigGateway;
use crate::registry::SettingRegistry;
use crate::store::{SnapshotStore, StoreBackend};
use crate::zones::ZonePolicy;

/// Applies zone overrides and restores baselines in response to host events.
pub struct OverrideEngine<G: ConfigGateway, B: StoreBackend> {
    pub(super) registry: SettingRegistry,
    pub(super) zones: ZonePolicy,
    pub(super) notification_expiry: Duration,
    pub(super) gateway: G,
    pub(super) backend: B,
    pub(super) state: EngineState,
}

impl<G: ConfigGateway, B: StoreBackend> OverrideEngine<G, B> {
    /// Load the store and get ready for events.
    ///
    /// Fails if the stored document cannot be read or was written by a
    /// newer version. The returned notifications hold the startup warning
    /// when a domain was left overwritten.
    pub fn start(config: EngineConfig, gateway: G, mut backend: B) -> Result<(Self, Notifications)> {
        let mut store = SnapshotStore::load(&backend, &config.registry, &gateway)?;
        let mut notes = Notifications::new();

        let system = store.is_overwritten(Domain::System);
        let ui = store.is_overwritten(Domain::Ui);
        if system || ui {
            warn!(system, ui, "settings were left overwritten, restoration may be incomplete");
            notes.push(Notification::InconsistentState { system, ui });
        }

        store.write_baseline_system_safe(&config.registry, &gateway);
        if let Err(err) = store.save(&mut backend) {
            warn!(error = %err, "failed to persist snapshot store");
            notes.push(Notification::PersistenceFailed(err.to_string()));
        }

        info!(
            settings = config.registry.len(),
            zones = config.zones.len(),
            "override engine started"
        );
        let engine = Self {
            zones: ZonePolicy::from_config(&config),
            notification_expiry: config.notification_expiry,
            registry: config.registry,
            gateway,
            backend,
            state: EngineState::new(store),
        };
        Ok((engine, notes))
    }

    /// Handle one host event.
    pub fn handle(&mut self, event: EngineEvent) -> Notifications {
        match event {
            EngineEvent::SessionStarted { player, zone } => self.session_started(player, zone),
            EngineEvent::SessionEnded => self.session_ended(),
            EngineEvent::ZoneChanged(zone) => {
                self.state.current_zone = Some(zone);
                self.evaluate_zone(zone)
            }
            EngineEvent::ConfigChanged(change) => {
                let mut notes = Notifications::new();
                if reconcile::reconcile(&self.registry, &self.gateway, &mut self.state, change) {
                    self.persist(&mut notes);
                }
                notes
            }
            EngineEvent::ConfigurationSaved => match self.state.current_zone {
                Some(zone) => self.evaluate_zone(zone),
                None => Notifications::new(),
            },
            EngineEvent::Shutdown => {
                info!("shutting down, restoring original settings");
                self.restore_all()
            }
        }
    }

    // === Accessors ===

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// The snapshot store.
    #[must_use]
    pub fn store(&self) -> &SnapshotStore {
        &self.state.store
    }

    /// The live store gateway.
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Mutable access to the gateway, for hosts that poll it.
    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    /// The persistence backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The setting registry.
    #[must_use]
    pub fn registry(&self) -> &SettingRegistry {
        &self.registry
    }

    /// How long notifications should stay on screen.
    #[must_use]
    pub fn notification_expiry(&self) -> Duration {
        self.notification_expiry
    }

    // === Session lifecycle ===

    fn session_started(&mut self, player: PlayerId, zone: ZoneId) -> Notifications {
        info!(%player, %zone, "session started");
        self.state.current_player = Some(player);
        self.state.current_zone = Some(zone);

        let store = &mut self.state.store;
        if store.ui_baseline(player).is_none() {
            store.capture_ui_baseline(player, &self.registry, &self.gateway);
        } else {
            store.write_baseline_ui_safe(player, &self.registry, &self.gateway);
        }

        let mut notes = self.evaluate_zone(zone);
        self.persist(&mut notes);
        notes
    }

    fn session_ended(&mut self) -> Notifications {
        info!("session ended, restoring original settings");
        let notes = self.restore_all();
        self.state.current_player = None;
        notes
    }

    /// Restore every overwritten domain and persist.
    fn restore_all(&mut self) -> Notifications {
        let mut notes = Notifications::new();
        let mut outcome = Outcome::None;
        for domain in Domain::ALL {
            if self.state.store.is_overwritten(domain) {
                outcome = outcome.combine(self.restore_domain(domain));
            }
        }
        self.persist(&mut notes);
        notes.extend(outcome.notification());
        notes
    }

    // === Zone evaluation ===

    /// Evaluate both domains for `zone` and summarise the result.
    pub(super) fn evaluate_zone(&mut self, zone: ZoneId) -> Notifications {
        let mut notes = Notifications::new();
        let mut outcome = Outcome::None;
        for domain in Domain::ALL {
            outcome = outcome.combine(self.evaluate_domain(domain, zone, &mut notes));
        }
        debug!(%zone, ?outcome, "zone evaluated");
        notes.extend(outcome.notification());
        notes
    }

    fn evaluate_domain(&mut self, domain: Domain, zone: ZoneId, notes: &mut Notifications) -> Outcome {
        let allowed = self.zones.is_allowed(zone);
        if !allowed && self.state.store.remove_override(domain, zone).is_some() {
            let zone_name = self.zones.info(zone).map_or("unlisted", |z| z.name.as_str());
            info!(%domain, %zone, zone_name, "removed override for a zone that no longer accepts overrides");
            self.persist(notes);
        }

        let has_subject = domain == Domain::System || self.state.current_player.is_some();
        let active = if allowed && has_subject {
            self.state.store.override_for(domain, zone).cloned()
        } else {
            None
        };

        match active {
            Some(snapshot) => {
                if self.state.store.is_overwritten(domain) {
                    debug!(%domain, "restoring baseline before applying the next override");
                    self.restore_baseline(domain);
                }
                self.state.store.set_overwritten(domain, true);
                self.persist(notes);

                let report = snapshot.apply_to_live_store(&self.registry, &mut self.gateway, true);
                info!(
                    %domain,
                    %zone,
                    written = report.written,
                    failed = report.failures.len(),
                    "applied zone override"
                );
                Outcome::Modified
            }
            None if self.state.store.is_overwritten(domain) => {
                let outcome = self.restore_domain(domain);
                self.persist(notes);
                outcome
            }
            None => Outcome::None,
        }
    }

    /// Write the baseline back and clear the flag if nothing failed.
    fn restore_domain(&mut self, domain: Domain) -> Outcome {
        if self.restore_baseline(domain) {
            self.state.store.set_overwritten(domain, false);
            info!(%domain, "restored original settings");
            Outcome::Original
        } else {
            Outcome::None
        }
    }

    /// Write the baseline of `domain` to the live store.
    ///
    /// Returns whether every write succeeded.
    fn restore_baseline(&mut self, domain: Domain) -> bool {
        let Some(baseline) = self.state.store.baseline(domain, self.state.current_player) else {
            warn!(%domain, "no baseline to restore without an active player");
            return false;
        };
        let report = baseline.apply_to_live_store(&self.registry, &mut self.gateway, true);
        if !report.is_clean() {
            warn!(
                %domain,
                failed = report.failures.len(),
                "baseline restore incomplete, keeping overwritten flag"
            );
        }
        report.is_clean()
    }

    // === Persistence ===

    /// Save the store, turning a failure into a notification.
    pub(super) fn persist(&mut self, notes: &mut Notifications) {
        if let Err(err) = self.state.store.save(&mut self.backend) {
            warn!(error = %err, "failed to persist snapshot store");
            let note = Notification::PersistenceFailed(err.to_string());
            if !notes.contains(&note) {
                notes.push(note);
            }
        }
    }
}
