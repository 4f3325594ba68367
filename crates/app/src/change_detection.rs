//! Change detection — does a host tick warrant a re-render?
//!
//! The host replaces entity snapshots instead of mutating them, so comparing
//! references is enough. Only two entities matter to the card: its weather
//! entity and `sun.sun`.

use crate::lifecycle::{CardInputs, ChangedFields, same_ref};

/// Decide whether moving from `prev` to `next` needs a new render.
///
/// - a new configuration or a new forecast payload always renders;
/// - otherwise a tick without a new host state never renders;
/// - otherwise the card renders when there was no previous host state, or
///   when the snapshot of the weather entity or of `sun.sun` was replaced.
#[must_use]
pub fn has_config_or_entity_changed(prev: &CardInputs, next: &CardInputs) -> bool {
    let changed = ChangedFields::between(prev, next);
    if changed.config || changed.forecast {
        return true;
    }
    if !changed.host {
        return false;
    }
    let (Some(old_host), Some(new_host), Some(config)) = (&prev.host, &next.host, &next.config)
    else {
        return true;
    };
    !same_ref(
        old_host.get_state(&config.entity),
        new_host.get_state(&config.entity),
    ) || !same_ref(old_host.sun(), new_host.sun())
}
