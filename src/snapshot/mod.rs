//! Configuration snapshots.
//!
//! A `Snapshot` is a typed bag of setting values for one domain plus the
//! set of keys marked *persisted*. Persisted keys are the ones written to
//! disk and written back to the live store; the rest are ephemeral
//! mirrors of whatever the live store held when the snapshot was taken.
//!
//! ## Invariant
//!
//! A persisted key always has a value of its descriptor's declared type.
//! Values can exist without being persisted, never the other way around.
//!
//! ## Cloning
//!
//! Values and persisted marks live in `im` ordered collections, so
//! cloning a snapshot before handing it to an editor is O(1) and edits
//! to the clone never reach the stored original.

mod apply;
mod codec;

pub use apply::ApplyReport;
pub use codec::SnapshotBlob;

use im::{OrdMap, OrdSet};
use tracing::trace;

use crate::core::error::Result;
use crate::core::ids::Domain;
use crate::core::value::Value;
use crate::gateway::ConfigGateway;
use crate::registry::{Descriptor, SettingId, SettingRegistry};

/// Setting values for one domain with per-key persisted marks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    domain: Domain,
    values: OrdMap<SettingId, Value>,
    persisted: OrdSet<SettingId>,
}

impl Snapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            values: OrdMap::new(),
            persisted: OrdSet::new(),
        }
    }

    /// Read every setting of `domain` from the live store.
    ///
    /// Nothing is persisted; settings the store does not report are absent.
    pub fn from_live(registry: &SettingRegistry, domain: Domain, gateway: &dyn ConfigGateway) -> Self {
        let mut snapshot = Self::new(domain);
        for descriptor in registry.all(domain) {
            match gateway.read(descriptor) {
                Some(value) => snapshot.set_ephemeral(descriptor, value),
                None => trace!(setting = %descriptor.id, "live store has no value"),
            }
        }
        snapshot
    }

    /// Domain this snapshot belongs to.
    #[must_use]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Read a setting.
    #[must_use]
    pub fn read(&self, descriptor: &Descriptor) -> Option<&Value> {
        self.values.get(&descriptor.id)
    }

    /// Whether a setting is marked persisted.
    #[must_use]
    pub fn is_persisted(&self, descriptor: &Descriptor) -> bool {
        self.persisted.contains(&descriptor.id)
    }

    /// Set a value and mark it persisted.
    ///
    /// Panics if the descriptor is read-only, belongs to the other domain,
    /// or the value has the wrong type.
    pub fn set_persistent(&mut self, descriptor: &Descriptor, value: Value) {
        assert!(descriptor.writable, "Setting {} is read-only", descriptor.id);
        self.insert(descriptor, value);
        self.persisted.insert(descriptor.id);
    }

    /// Validate a value against type and range, then set it persisted.
    pub fn try_set_persistent(&mut self, descriptor: &Descriptor, value: Value) -> Result<()> {
        descriptor.check(&value)?;
        self.set_persistent(descriptor, value);
        Ok(())
    }

    /// Set a value and clear its persisted mark.
    pub fn set_ephemeral(&mut self, descriptor: &Descriptor, value: Value) {
        self.insert(descriptor, value);
        self.persisted.remove(&descriptor.id);
    }

    /// Clear the persisted mark, keeping the value.
    ///
    /// Returns whether the setting was persisted.
    pub fn clear_persisted(&mut self, descriptor: &Descriptor) -> bool {
        self.persisted.remove(&descriptor.id).is_some()
    }

    /// Mark every setting that has a value as persisted.
    #[must_use]
    pub fn persist_all(mut self) -> Self {
        self.persisted = self.values.keys().copied().collect();
        self
    }

    /// Clear every persisted mark.
    #[must_use]
    pub fn depersist_all(mut self) -> Self {
        self.persisted = OrdSet::new();
        self
    }

    /// Whether any setting is persisted.
    #[must_use]
    pub fn has_any_persisted(&self) -> bool {
        !self.persisted.is_empty()
    }

    /// Persisted setting ids, in id order.
    pub fn persisted_ids(&self) -> impl Iterator<Item = SettingId> + '_ {
        self.persisted.iter().copied()
    }

    /// Number of settings with a value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no setting has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn insert(&mut self, descriptor: &Descriptor, value: Value) {
        assert_eq!(
            descriptor.domain(),
            self.domain,
            "Setting {} does not belong to the {} domain",
            descriptor.id,
            self.domain
        );
        assert!(
            descriptor.value_type.admits(&value),
            "Setting {} expects {}, got {}",
            descriptor.id,
            descriptor.value_type,
            value
        );
        self.values.insert(descriptor.id, value);
    }
}
