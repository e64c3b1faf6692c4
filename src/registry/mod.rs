//! Setting descriptor registry.
//!
//! The `SettingRegistry` is the static table of every setting the crate
//! manages. It is built once at startup (usually from [`catalog::builtin`])
//! and is read-only afterwards.
//!
//! ## Lookups
//!
//! - by [`SettingId`]: the at-rest name, used by snapshots and the codec
//! - by [`ExternalKey`]: the live-store key, used by reconciliation
//! - by [`Domain`]: every descriptor of one domain, in registration order

pub mod catalog;
pub mod descriptor;

use rustc_hash::FxHashMap;

pub use descriptor::{Descriptor, ExternalKey, KeySection, SettingId};

use crate::core::error::{Error, Result};
use crate::core::ids::Domain;

/// Registry of setting descriptors.
///
/// ## Example
///
/// ```
/// use zone_settings::registry::{Descriptor, ExternalKey, SettingId, SettingRegistry};
///
/// let mut registry = SettingRegistry::new();
/// registry.register(Descriptor::uint("MasterVolume", ExternalKey::system("SoundMaster"), 0, 100));
///
/// let master = registry.describe(SettingId("MasterVolume"));
/// assert_eq!(master.key, ExternalKey::system("SoundMaster"));
/// assert!(registry.lookup_key(ExternalKey::system("SoundBgm")).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SettingRegistry {
    descriptors: Vec<Descriptor>,
    by_id: FxHashMap<SettingId, usize>,
    by_name: FxHashMap<&'static str, usize>,
    by_key: FxHashMap<ExternalKey, usize>,
}

impl SettingRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor.
    ///
    /// Panics if the id or the external key is already registered.
    pub fn register(&mut self, descriptor: Descriptor) {
        if self.by_id.contains_key(&descriptor.id) {
            panic!("Setting {} already registered", descriptor.id);
        }
        if self.by_key.contains_key(&descriptor.key) {
            panic!("External key {} already registered", descriptor.key);
        }
        let index = self.descriptors.len();
        self.by_id.insert(descriptor.id, index);
        self.by_name.insert(descriptor.id.name(), index);
        self.by_key.insert(descriptor.key, index);
        self.descriptors.push(descriptor);
    }

    /// Get a descriptor by id, panicking if not found.
    ///
    /// Asking for an id that was never registered is a programming error.
    #[must_use]
    pub fn describe(&self, id: SettingId) -> &Descriptor {
        match self.get(id) {
            Some(descriptor) => descriptor,
            None => panic!("Setting {} not found in registry", id),
        }
    }

    /// Get a descriptor by id.
    #[must_use]
    pub fn get(&self, id: SettingId) -> Option<&Descriptor> {
        self.by_id.get(&id).map(|&i| &self.descriptors[i])
    }

    /// Get a descriptor by its at-rest name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&Descriptor> {
        self.by_name.get(name).map(|&i| &self.descriptors[i])
    }

    /// Resolve an at-rest name read from outside the crate.
    pub fn resolve(&self, name: &str) -> Result<&Descriptor> {
        self.get_by_name(name)
            .ok_or_else(|| Error::UnknownSetting(name.to_string()))
    }

    /// Map a live-store key to its descriptor.
    ///
    /// Returns `None` for settings this crate does not manage.
    #[must_use]
    pub fn lookup_key(&self, key: ExternalKey) -> Option<&Descriptor> {
        self.by_key.get(&key).map(|&i| &self.descriptors[i])
    }

    /// All descriptors of a domain, in registration order.
    pub fn all(&self, domain: Domain) -> impl Iterator<Item = &Descriptor> {
        self.descriptors.iter().filter(move |d| d.domain() == domain)
    }

    /// Iterate all descriptors.
    pub fn iter(&self) -> impl Iterator<Item = &Descriptor> {
        self.descriptors.iter()
    }

    /// Get the number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
