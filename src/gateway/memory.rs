//! In-memory live store.
//!
//! Behaves like the client's store: writes that change a value queue a
//! change notification, reads of the wrong kind return nothing. Used by
//! the test suites and by hosts that want to dry-run the engine.

use rustc_hash::{FxHashMap, FxHashSet};

use super::{ConfigChange, ConfigGateway, LiveKind, LiveValue};
use crate::core::error::{Error, Result};
use crate::registry::ExternalKey;

/// Live store kept in a hash map.
#[derive(Clone, Debug, Default)]
pub struct MemoryGateway {
    values: FxHashMap<ExternalKey, LiveValue>,
    pending: Vec<ConfigChange>,
    rejected: FxHashSet<ExternalKey>,
    writes: usize,
}

impl MemoryGateway {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without queueing a change (builder pattern).
    #[must_use]
    pub fn with_value(mut self, key: ExternalKey, value: LiveValue) -> Self {
        self.values.insert(key, value);
        self
    }

    /// Seed a value without queueing a change.
    pub fn insert(&mut self, key: ExternalKey, value: LiveValue) {
        self.values.insert(key, value);
    }

    /// Current raw value of a key.
    #[must_use]
    pub fn get(&self, key: ExternalKey) -> Option<&LiveValue> {
        self.values.get(&key)
    }

    /// Simulate the player changing a setting through the client's menu.
    pub fn change_organically(&mut self, key: ExternalKey, value: LiveValue) {
        if self.values.get(&key) != Some(&value) {
            self.values.insert(key, value);
            self.pending.push(ConfigChange::new(key));
        }
    }

    /// Make every future write to `key` fail.
    pub fn reject_writes_to(&mut self, key: ExternalKey) {
        self.rejected.insert(key);
    }

    /// Accept writes to `key` again.
    pub fn accept_writes_to(&mut self, key: ExternalKey) {
        self.rejected.remove(&key);
    }

    /// Take the queued change notifications, oldest first.
    pub fn drain_changes(&mut self) -> Vec<ConfigChange> {
        std::mem::take(&mut self.pending)
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl ConfigGateway for MemoryGateway {
    fn try_get(&self, key: ExternalKey, kind: LiveKind) -> Option<LiveValue> {
        self.values.get(&key).filter(|v| v.kind() == kind).cloned()
    }

    fn set(&mut self, key: ExternalKey, value: LiveValue) -> Result<()> {
        if self.rejected.contains(&key) {
            return Err(Error::Gateway {
                key: key.to_string(),
                message: "write rejected".to_string(),
            });
        }
        if let Some(existing) = self.values.get(&key) {
            if existing.kind() != value.kind() {
                return Err(Error::Gateway {
                    key: key.to_string(),
                    message: format!("stored as {:?}, written as {:?}", existing.kind(), value.kind()),
                });
            }
            if existing == &value {
                self.writes += 1;
                return Ok(());
            }
        }
        self.values.insert(key, value);
        self.pending.push(ConfigChange::new(key));
        self.writes += 1;
        Ok(())
    }
}
