//! Writing snapshots back to the live store.

use smallvec::SmallVec;
use tracing::{trace, warn};

use super::Snapshot;
use crate::core::error::Error;
use crate::gateway::ConfigGateway;
use crate::registry::{SettingId, SettingRegistry};

/// Outcome of one apply pass.
///
/// A failed write never stops the pass; failures are collected here.
#[derive(Debug, Default)]
pub struct ApplyReport {
    /// Settings written successfully.
    pub written: usize,

    /// Settings with a value that were not written because they are read-only.
    pub skipped: usize,

    /// Settings whose write failed.
    pub failures: SmallVec<[(SettingId, Error); 2]>,
}

impl ApplyReport {
    /// Whether every attempted write succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Snapshot {
    /// Write this snapshot to the live store.
    ///
    /// With `only_persisted`, only persisted settings are written;
    /// otherwise every setting with a value is. Settings are written in
    /// registration order.
    pub fn apply_to_live_store(
        &self,
        registry: &SettingRegistry,
        gateway: &mut dyn ConfigGateway,
        only_persisted: bool,
    ) -> ApplyReport {
        let mut report = ApplyReport::default();

        for descriptor in registry.all(self.domain) {
            if only_persisted && !self.is_persisted(descriptor) {
                continue;
            }
            let Some(value) = self.read(descriptor) else {
                continue;
            };
            if !descriptor.writable {
                report.skipped += 1;
                continue;
            }

            trace!(setting = %descriptor.id, %value, "applying to live store");
            match gateway.write(descriptor, value) {
                Ok(()) => report.written += 1,
                Err(err) => {
                    warn!(setting = %descriptor.id, error = %err, "failed to apply setting");
                    report.failures.push((descriptor.id, err));
                }
            }
        }

        report
    }
}
