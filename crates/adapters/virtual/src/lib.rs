//! # weathercard-adapter-virtual
//!
//! Virtual/demo host that stands in for a real dashboard host, for testing
//! and demonstration purposes.
//!
//! ## Provided pieces
//!
//! | Piece | Behaviour |
//! |-------|-----------|
//! | [`VirtualHost`] | Holds the current [`HostState`], opens forecast subscriptions, records fired events |
//! | [`demo::VirtualWeatherStation`] | Simulated `weather.virtual_home` entity with daily and hourly forecasts |
//! | [`demo::VirtualSun`] | Simulated `sun.sun` entity |
//!
//! ## Dependency rule
//!
//! Depends on `weathercard-app` (port traits) and `weathercard-domain` only.

pub mod demo;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use weathercard_app::ports::{
    ConnectionError, EventDispatcher, ForecastConnection, ForecastRequest, ForecastSink,
    ForecastUnsubscribe, HostEvent,
};
use weathercard_domain::config::ForecastType;
use weathercard_domain::entity::EntitySnapshot;
use weathercard_domain::forecast::ForecastPayload;
use weathercard_domain::host::HostState;

#[derive(Default)]
struct Inner {
    state: Arc<HostState>,
    next_id: u64,
    live: BTreeMap<u64, (ForecastRequest, ForecastSink)>,
    opened: Vec<ForecastRequest>,
    unsubscribed: Vec<ForecastRequest>,
    events: Vec<HostEvent>,
}

/// In-memory host.
///
/// Cloning is cheap and every clone shares the same state, so one clone can
/// be handed to a card while another drives the simulation.
#[derive(Clone, Default)]
pub struct VirtualHost {
    inner: Arc<Mutex<Inner>>,
}

impl std::fmt::Debug for VirtualHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("VirtualHost")
            .field("entities", &inner.state.states.len())
            .field("live_subscriptions", &inner.live.len())
            .finish_non_exhaustive()
    }
}

impl VirtualHost {
    /// Host starting from `state`.
    #[must_use]
    pub fn new(state: HostState) -> Self {
        let host = Self::default();
        host.lock().state = Arc::new(state);
        host
    }

    /// Host with the simulated weather station and sun.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(demo::demo_state())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current host tick.
    #[must_use]
    pub fn state(&self) -> Arc<HostState> {
        Arc::clone(&self.lock().state)
    }

    /// Publish a new tick where `snapshot` replaces its entity.
    pub fn set_entity(&self, snapshot: EntitySnapshot) -> Arc<HostState> {
        let mut inner = self.lock();
        inner.state = Arc::new(inner.state.with_entity(snapshot));
        Arc::clone(&inner.state)
    }

    /// Publish a new tick without `entity_id`.
    pub fn remove_entity(&self, entity_id: &str) -> Arc<HostState> {
        let mut inner = self.lock();
        inner.state = Arc::new(inner.state.without_entity(entity_id));
        Arc::clone(&inner.state)
    }

    /// Push `payload` to every live subscription for `entity_id` and the
    /// payload's forecast type.
    ///
    /// Returns how many subscribers received it. Subscriptions whose card
    /// went away are dropped on the way.
    pub fn push_forecast(&self, entity_id: &str, payload: &ForecastPayload) -> usize {
        let mut inner = self.lock();
        inner.live.retain(|_, (_, sink)| !sink.is_closed());
        let mut delivered = 0;
        for (request, sink) in inner.live.values() {
            if request.entity_id != entity_id || request.forecast_type != payload.forecast_type {
                continue;
            }
            match sink.deliver(payload.clone()) {
                Ok(()) => delivered += 1,
                Err(err) => tracing::debug!(%err, entity_id, "dropping forecast push"),
            }
        }
        delivered
    }

    /// Requests of the subscriptions currently open.
    #[must_use]
    pub fn live_subscriptions(&self) -> Vec<ForecastRequest> {
        self.lock()
            .live
            .values()
            .map(|(request, _)| request.clone())
            .collect()
    }

    /// Every subscription ever opened, in order.
    #[must_use]
    pub fn opened(&self) -> Vec<ForecastRequest> {
        self.lock().opened.clone()
    }

    /// Every unsubscribe received, in order.
    #[must_use]
    pub fn unsubscribed(&self) -> Vec<ForecastRequest> {
        self.lock().unsubscribed.clone()
    }

    /// Every event the card fired, in order.
    #[must_use]
    pub fn events(&self) -> Vec<HostEvent> {
        self.lock().events.clone()
    }

    /// Forecast types currently streamed for `entity_id`.
    #[must_use]
    pub fn streamed_types(&self, entity_id: &str) -> Vec<ForecastType> {
        self.lock()
            .live
            .values()
            .filter(|(request, _)| request.entity_id == entity_id)
            .map(|(request, _)| request.forecast_type)
            .collect()
    }
}

/// Unsubscribe handle returned by [`VirtualHost`].
struct VirtualSubscription {
    id: u64,
    host: Weak<Mutex<Inner>>,
}

impl ForecastUnsubscribe for VirtualSubscription {
    fn unsubscribe(self: Box<Self>) -> Result<(), ConnectionError> {
        let host = self.host.upgrade().ok_or(ConnectionError::Closed)?;
        let mut inner = host.lock().unwrap_or_else(PoisonError::into_inner);
        let (request, _) = inner.live.remove(&self.id).ok_or_else(|| {
            ConnectionError::Rejected(format!("unknown subscription {}", self.id))
        })?;
        tracing::debug!(entity_id = %request.entity_id, "virtual host closed forecast stream");
        inner.unsubscribed.push(request);
        Ok(())
    }
}

impl ForecastConnection for VirtualHost {
    fn subscribe_forecast(
        &self,
        request: ForecastRequest,
        sink: ForecastSink,
    ) -> Box<dyn ForecastUnsubscribe> {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        tracing::debug!(id, message = %request.message(), "virtual host opened forecast stream");
        inner.opened.push(request.clone());
        inner.live.insert(id, (request, sink));
        Box::new(VirtualSubscription {
            id,
            host: Arc::downgrade(&self.inner),
        })
    }
}

impl EventDispatcher for VirtualHost {
    fn fire_event(&self, event: HostEvent) {
        tracing::debug!(event_type = %event.event_type, detail = %event.detail, "card fired event");
        self.lock().events.push(event);
    }
}
