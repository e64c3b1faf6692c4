//! Keeping baselines in sync with organic settings changes.
//!
//! When the player changes a setting through the client's own menu the
//! new value becomes part of their baseline, so restoring later does not
//! undo it. While a domain is overwritten, changes to keys the active
//! override controls are the engine's own writes (or would be undone on
//! restore anyway) and must not leak into the baseline.

use tracing::{debug, trace, warn};

use super::state::EngineState;
use crate::gateway::{ConfigChange, ConfigGateway};
use crate::registry::SettingRegistry;

/// Fold one live change into the baseline.
///
/// Returns whether the store changed and needs saving.
pub fn reconcile(
    registry: &SettingRegistry,
    gateway: &dyn ConfigGateway,
    state: &mut EngineState,
    change: ConfigChange,
) -> bool {
    let Some(descriptor) = registry.lookup_key(change.key) else {
        trace!(key = %change.key, "ignoring change to unmanaged key");
        return false;
    };
    if !descriptor.writable {
        trace!(setting = %descriptor.id, "ignoring change to read-only setting");
        return false;
    }

    let domain = descriptor.domain();
    if state.store.is_overwritten(domain) {
        let controlled = state
            .current_zone
            .and_then(|zone| state.store.override_for(domain, zone))
            .map_or(true, |snapshot| snapshot.is_persisted(descriptor));
        if controlled {
            debug!(setting = %descriptor.id, %domain, "suppressing change while overwritten");
            return false;
        }
    }

    let Some(value) = gateway.read(descriptor) else {
        warn!(setting = %descriptor.id, "changed setting could not be read back");
        return false;
    };

    let player = state.current_player;
    let Some(baseline) = state.store.baseline_mut(domain, player) else {
        debug!(setting = %descriptor.id, "no UI baseline without an active player");
        return false;
    };
    if baseline.is_persisted(descriptor) && baseline.read(descriptor) == Some(&value) {
        return false;
    }

    debug!(setting = %descriptor.id, %value, "updating baseline from live change");
    baseline.set_persistent(descriptor, value);
    true
}
