//! Forecast subscription — keeps at most one live forecast stream per card.

use std::sync::Arc;

use tokio::sync::mpsc;

use weathercard_domain::config::CardConfig;
use weathercard_domain::forecast::ForecastPayload;

use crate::ports::{ForecastConnection, ForecastRequest, ForecastSink, ForecastUnsubscribe};

struct ActiveSubscription {
    request: ForecastRequest,
    handle: Box<dyn ForecastUnsubscribe>,
    updates: mpsc::UnboundedReceiver<ForecastPayload>,
}

/// Owner of the card's single subscription slot.
///
/// The payload receiver lives inside the slot. Tearing the subscription down
/// drops it, so nothing the host pushes afterwards can reach the card.
#[derive(Default)]
pub struct ForecastSubscription {
    active: Option<ActiveSubscription>,
    latest: Option<Arc<ForecastPayload>>,
    /// Entity the latest payload was streamed for.
    latest_entity: Option<String>,
}

impl std::fmt::Debug for ForecastSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastSubscription")
            .field("request", &self.request())
            .field("latest", &self.latest)
            .finish()
    }
}

impl ForecastSubscription {
    /// Replace the current subscription with one matching `config`.
    ///
    /// Any existing subscription is torn down first. A new one is only opened
    /// when the card is `connected`, host context is present (`connection` is
    /// `Some`) and the configuration streams its forecast.
    #[tracing::instrument(skip(self, connection, config))]
    pub fn ensure_subscribed<C>(
        &mut self,
        connection: Option<&C>,
        config: Option<&CardConfig>,
        connected: bool,
    ) where
        C: ForecastConnection + ?Sized,
    {
        self.teardown();
        if let Some(config) = config {
            self.forget_other_entity(&config.entity);
        }
        let (Some(connection), Some(config)) = (connection, config) else {
            return;
        };
        if !connected {
            return;
        }
        let Some(forecast_type) = config.streamed_forecast_type() else {
            return;
        };

        let request = ForecastRequest::new(config.entity.clone(), forecast_type);
        tracing::debug!(
            entity_id = %request.entity_id,
            %forecast_type,
            "subscribing to forecast"
        );
        let (sink, updates) = ForecastSink::channel();
        let handle = connection.subscribe_forecast(request.clone(), sink);
        self.active = Some(ActiveSubscription {
            request,
            handle,
            updates,
        });
    }

    /// Drop the current subscription, if any.
    ///
    /// The host is asked to unsubscribe; failures are logged and swallowed.
    pub fn teardown(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        tracing::debug!(
            entity_id = %active.request.entity_id,
            forecast_type = %active.request.forecast_type,
            "unsubscribing from forecast"
        );
        if let Err(err) = active.handle.unsubscribe() {
            tracing::debug!(%err, "forecast unsubscribe failed, ignoring");
        }
    }

    fn forget_other_entity(&mut self, entity_id: &str) {
        if self.latest_entity.as_deref() != Some(entity_id) {
            self.latest = None;
            self.latest_entity = None;
        }
    }

    /// Whether a subscription is currently held.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.active.is_some()
    }

    /// Key of the current subscription.
    #[must_use]
    pub fn request(&self) -> Option<&ForecastRequest> {
        self.active.as_ref().map(|active| &active.request)
    }

    /// Last payload received, if any.
    ///
    /// Survives resubscription for the same entity until the new stream
    /// delivers. Switching to another entity discards it.
    #[must_use]
    pub fn latest(&self) -> Option<&Arc<ForecastPayload>> {
        self.latest.as_ref()
    }

    /// Apply every payload already delivered, without waiting.
    ///
    /// Returns `true` when at least one new payload arrived.
    pub fn poll(&mut self) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let mut received = None;
        while let Ok(payload) = active.updates.try_recv() {
            received = Some(payload);
        }
        match received {
            Some(payload) => {
                self.latest = Some(Arc::new(payload));
                self.latest_entity = Some(active.request.entity_id.clone());
                true
            }
            None => false,
        }
    }

    /// Wait for the next payload and apply it.
    ///
    /// Returns `None` right away when there is no subscription or the host
    /// closed the stream.
    pub async fn next_payload(&mut self) -> Option<Arc<ForecastPayload>> {
        let active = self.active.as_mut()?;
        let payload = Arc::new(active.updates.recv().await?);
        self.latest = Some(Arc::clone(&payload));
        self.latest_entity = Some(active.request.entity_id.clone());
        Some(payload)
    }
}
