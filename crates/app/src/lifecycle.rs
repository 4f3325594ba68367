//! Card lifecycle — the hooks a dashboard host drives.

use std::sync::Arc;

use weathercard_domain::config::CardConfig;
use weathercard_domain::forecast::ForecastPayload;
use weathercard_domain::host::HostState;

/// Everything a render depends on.
///
/// All three inputs are shared, immutable snapshots. A changed input is a
/// *different* `Arc`; comparing inputs never looks inside them.
#[derive(Debug, Clone, Default)]
pub struct CardInputs {
    pub config: Option<Arc<CardConfig>>,
    pub host: Option<Arc<HostState>>,
    pub forecast: Option<Arc<ForecastPayload>>,
}

/// Which inputs differ between two renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangedFields {
    pub config: bool,
    pub host: bool,
    pub forecast: bool,
}

impl ChangedFields {
    /// Compare two sets of inputs by reference.
    #[must_use]
    pub fn between(prev: &CardInputs, next: &CardInputs) -> Self {
        Self {
            config: !same_ref(prev.config.as_ref(), next.config.as_ref()),
            host: !same_ref(prev.host.as_ref(), next.host.as_ref()),
            forecast: !same_ref(prev.forecast.as_ref(), next.forecast.as_ref()),
        }
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.config || self.host || self.forecast)
    }
}

/// Reference equality for optional shared values.
#[must_use]
pub fn same_ref<T: ?Sized>(a: Option<&Arc<T>>, b: Option<&Arc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Hooks a host calls on a card.
///
/// The host calls them in this order:
///
/// 1. [`on_attach`](Self::on_attach) — the card entered the display tree
/// 2. for every tick, [`should_render`](Self::should_render); when it says
///    yes the host renders, then calls [`on_rendered`](Self::on_rendered)
/// 3. [`on_detach`](Self::on_detach) — the card left the display tree
///
/// A detached card may be attached again later.
pub trait CardLifecycle {
    fn on_attach(&mut self);

    fn on_detach(&mut self);

    /// Decide whether moving from `prev` to `next` needs a new render.
    fn should_render(&self, prev: &CardInputs, next: &CardInputs) -> bool;

    /// Called after every render with the inputs that changed.
    fn on_rendered(&mut self, changed: &ChangedFields);
}
