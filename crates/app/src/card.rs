//! Weather card — ties configuration, host state and the forecast
//! subscription together behind the [`CardLifecycle`] hooks.

use std::sync::Arc;

use weathercard_domain::config::CardConfig;
use weathercard_domain::error::ConfigError;
use weathercard_domain::host::HostState;

use crate::change_detection::has_config_or_entity_changed;
use crate::forecast_subscription::ForecastSubscription;
use crate::lifecycle::{CardInputs, CardLifecycle, ChangedFields};
use crate::ports::{EventDispatcher, ForecastConnection, ForecastRequest, HostEvent};
use crate::view::{self, CardView};

/// Height hint reported to the host's grid layout.
pub const CARD_SIZE: u32 = 3;

/// One weather card instance.
///
/// `H` is the host connection: it opens forecast subscriptions and receives
/// click events.
pub struct WeatherCard<H> {
    connection: H,
    config: Option<Arc<CardConfig>>,
    host: Option<Arc<HostState>>,
    connected: bool,
    has_updated: bool,
    rendered: CardInputs,
    subscription: ForecastSubscription,
}

impl<H> std::fmt::Debug for WeatherCard<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherCard")
            .field("config", &self.config)
            .field("connected", &self.connected)
            .field("has_updated", &self.has_updated)
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}

impl<H> WeatherCard<H>
where
    H: ForecastConnection + EventDispatcher,
{
    /// Create a detached, unconfigured card.
    pub fn new(connection: H) -> Self {
        Self {
            connection,
            config: None,
            host: None,
            connected: false,
            has_updated: false,
            rendered: CardInputs::default(),
            subscription: ForecastSubscription::default(),
        }
    }

    /// Replace the configuration.
    ///
    /// The previous configuration stays in place when `value` is refused.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `value` does not decode or names no entity.
    pub fn set_config(&mut self, value: serde_json::Value) -> Result<(), ConfigError> {
        let config = CardConfig::from_value(value)
            .inspect_err(|err| tracing::warn!(%err, "rejected card configuration"))?;
        self.config = Some(Arc::new(config));
        Ok(())
    }

    /// Replace the configuration with an already validated one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEntity`] when `config` names no entity.
    pub fn set_card_config(&mut self, config: CardConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = Some(Arc::new(config));
        Ok(())
    }

    /// Hand over the host's latest tick.
    pub fn set_host(&mut self, host: Arc<HostState>) {
        self.host = Some(host);
    }

    #[must_use]
    pub fn config(&self) -> Option<&CardConfig> {
        self.config.as_deref()
    }

    /// Key of the live forecast subscription.
    #[must_use]
    pub fn subscription(&self) -> Option<&ForecastRequest> {
        self.subscription.request()
    }

    /// Run one update cycle.
    ///
    /// Applies forecast payloads that arrived since the last cycle, asks
    /// [`should_render`](CardLifecycle::should_render), and on yes renders
    /// and runs [`on_rendered`](CardLifecycle::on_rendered). Returns the new
    /// view, or `None` when nothing relevant changed.
    pub fn update(&mut self) -> Option<CardView> {
        self.subscription.poll();
        let next = self.inputs();
        if !self.should_render(&self.rendered, &next) {
            return None;
        }
        let view = render_inputs(&next);
        let changed = ChangedFields::between(&self.rendered, &next);
        self.rendered = next;
        self.has_updated = true;
        self.on_rendered(&changed);
        Some(view)
    }

    /// Render the current inputs unconditionally.
    #[must_use]
    pub fn render(&self) -> CardView {
        render_inputs(&self.inputs())
    }

    /// Wait until the host pushes a forecast.
    ///
    /// Returns `false` right away when there is no subscription or the host
    /// closed it. Follow up with [`update`](Self::update).
    pub async fn forecast_changed(&mut self) -> bool {
        self.subscription.next_payload().await.is_some()
    }

    /// The user clicked the card: ask the host for the entity's detail view.
    pub fn handle_click(&self) {
        if let Some(config) = &self.config {
            self.connection
                .fire_event(HostEvent::more_info(&config.entity));
        }
    }

    /// Height hint for the host's grid layout.
    #[must_use]
    pub fn card_size(&self) -> u32 {
        CARD_SIZE
    }

    fn inputs(&self) -> CardInputs {
        CardInputs {
            config: self.config.clone(),
            host: self.host.clone(),
            forecast: self.subscription.latest().cloned(),
        }
    }

    fn resubscribe(&mut self) {
        let connection = self.host.as_ref().map(|_| &self.connection);
        self.subscription
            .ensure_subscribed(connection, self.config.as_deref(), self.connected);
    }
}

fn render_inputs(inputs: &CardInputs) -> CardView {
    match (&inputs.config, &inputs.host) {
        (Some(config), Some(host)) => view::render(config, host, inputs.forecast.as_deref()),
        _ => CardView::Empty,
    }
}

impl<H> CardLifecycle for WeatherCard<H>
where
    H: ForecastConnection + EventDispatcher,
{
    fn on_attach(&mut self) {
        self.connected = true;
        if self.has_updated && self.config.is_some() && self.host.is_some() {
            self.resubscribe();
        }
    }

    fn on_detach(&mut self) {
        self.connected = false;
        self.subscription.teardown();
    }

    fn should_render(&self, prev: &CardInputs, next: &CardInputs) -> bool {
        has_config_or_entity_changed(prev, next)
    }

    fn on_rendered(&mut self, changed: &ChangedFields) {
        if self.host.is_none() || self.config.is_none() {
            return;
        }
        if changed.config || !self.subscription.is_subscribed() {
            self.resubscribe();
        }
    }
}

impl<H> Drop for WeatherCard<H> {
    fn drop(&mut self) {
        self.subscription.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use serde_json::json;
    use weathercard_domain::config::ForecastType;
    use weathercard_domain::entity::EntitySnapshot;
    use weathercard_domain::forecast::{ForecastPayload, ForecastPoint};

    use crate::ports::{ConnectionError, ForecastSink, ForecastUnsubscribe};

    #[derive(Default)]
    struct FakeHost {
        opened: Mutex<Vec<(ForecastRequest, ForecastSink)>>,
        closed: Arc<Mutex<Vec<ForecastRequest>>>,
        events: Mutex<Vec<HostEvent>>,
    }

    struct FakeHandle {
        request: ForecastRequest,
        closed: Arc<Mutex<Vec<ForecastRequest>>>,
    }

    impl ForecastUnsubscribe for FakeHandle {
        fn unsubscribe(self: Box<Self>) -> Result<(), ConnectionError> {
            let Self { request, closed } = *self;
            closed.lock().unwrap().push(request);
            Ok(())
        }
    }

    impl ForecastConnection for FakeHost {
        fn subscribe_forecast(
            &self,
            request: ForecastRequest,
            sink: ForecastSink,
        ) -> Box<dyn ForecastUnsubscribe> {
            self.opened.lock().unwrap().push((request.clone(), sink));
            Box::new(FakeHandle {
                request,
                closed: Arc::clone(&self.closed),
            })
        }
    }

    impl EventDispatcher for FakeHost {
        fn fire_event(&self, event: HostEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl FakeHost {
        fn opened(&self) -> Vec<ForecastRequest> {
            self.opened
                .lock()
                .unwrap()
                .iter()
                .map(|(request, _)| request.clone())
                .collect()
        }

        fn closed(&self) -> Vec<ForecastRequest> {
            self.closed.lock().unwrap().clone()
        }

        fn push_latest(&self, payload: ForecastPayload) -> Result<(), ConnectionError> {
            let opened = self.opened.lock().unwrap();
            let (_, sink) = opened.last().ok_or(ConnectionError::Closed)?;
            sink.deliver(payload)
        }
    }

    fn host_state() -> Arc<HostState> {
        Arc::new(
            HostState::default()
                .with_entity(
                    EntitySnapshot::new("weather.home", "sunny").with_attribute("temperature", 21),
                )
                .with_entity(EntitySnapshot::new("sun.sun", "above_horizon")),
        )
    }

    fn payload() -> ForecastPayload {
        ForecastPayload::new(
            ForecastType::Daily,
            vec![ForecastPoint::new("2024-05-01T12:00:00+00:00", "rainy", 15.0)],
        )
    }

    fn attached_card(host: &Arc<FakeHost>, config: serde_json::Value) -> WeatherCard<Arc<FakeHost>> {
        let mut card = WeatherCard::new(Arc::clone(host));
        card.set_config(config).unwrap();
        card.set_host(host_state());
        card.on_attach();
        card
    }

    #[test]
    fn should_render_empty_before_configuration() {
        let card = WeatherCard::new(Arc::new(FakeHost::default()));
        assert_eq!(card.render(), CardView::Empty);
    }

    #[test]
    fn should_refuse_config_without_entity_and_keep_previous() {
        let host = Arc::new(FakeHost::default());
        let mut card = WeatherCard::new(Arc::clone(&host));
        card.set_config(json!({"entity": "weather.home"})).unwrap();
        let result = card.set_config(json!({"name": "nothing"}));
        assert!(matches!(result, Err(ConfigError::MissingEntity)));
        assert_eq!(card.config().unwrap().entity, "weather.home");
    }

    #[test]
    fn should_subscribe_after_first_render() {
        let host = Arc::new(FakeHost::default());
        let mut card = attached_card(&host, json!({"entity": "weather.home"}));
        assert!(host.opened().is_empty());

        assert!(card.update().is_some());
        assert_eq!(
            host.opened(),
            vec![ForecastRequest::new("weather.home", ForecastType::Daily)]
        );
    }

    #[test]
    fn should_render_not_available_notice_for_missing_entity() {
        let host = Arc::new(FakeHost::default());
        let mut card = attached_card(&host, json!({"entity": "weather.attic"}));
        assert_eq!(
            card.update(),
            Some(CardView::NotAvailable {
                entity_id: "weather.attic".to_string()
            })
        );
    }

    #[test]
    fn should_never_subscribe_when_forecast_is_disabled() {
        let host = Arc::new(FakeHost::default());
        let mut card = attached_card(&host, json!({"entity": "weather.home", "forecast": false}));
        card.update();
        card.on_detach();
        card.on_attach();
        card.set_host(host_state());
        card.update();
        assert!(host.opened().is_empty());
    }

    #[test]
    fn should_resubscribe_once_when_forecast_type_changes() {
        let host = Arc::new(FakeHost::default());
        let mut card = attached_card(&host, json!({"entity": "weather.home", "forecast_type": "daily"}));
        card.update();

        card.set_config(json!({"entity": "weather.home", "forecast_type": "hourly"}))
            .unwrap();
        assert!(card.update().is_some());

        assert_eq!(
            host.closed(),
            vec![ForecastRequest::new("weather.home", ForecastType::Daily)]
        );
        assert_eq!(
            host.opened(),
            vec![
                ForecastRequest::new("weather.home", ForecastType::Daily),
                ForecastRequest::new("weather.home", ForecastType::Hourly),
            ]
        );
    }

    #[test]
    fn should_not_resubscribe_on_host_ticks() {
        let host = Arc::new(FakeHost::default());
        let mut card = attached_card(&host, json!({"entity": "weather.home"}));
        card.update();

        for _ in 0..3 {
            card.set_host(host_state());
            card.update();
        }
        assert_eq!(host.opened().len(), 1);
        assert!(host.closed().is_empty());
    }

    #[test]
    fn should_tear_down_once_on_detach_and_ignore_later_payloads() {
        let host = Arc::new(FakeHost::default());
        let mut card = attached_card(&host, json!({"entity": "weather.home"}));
        card.update();

        card.on_detach();
        assert_eq!(host.closed().len(), 1);
        assert!(host.push_latest(payload()).is_err());
        assert!(card.update().is_none());
        assert!(card.subscription().is_none());
    }

    #[test]
    fn should_resubscribe_on_reattach() {
        let host = Arc::new(FakeHost::default());
        let mut card = attached_card(&host, json!({"entity": "weather.home"}));
        card.update();
        card.on_detach();
        card.on_attach();
        assert_eq!(host.opened().len(), 2);
        assert_eq!(host.closed().len(), 1);
    }

    #[test]
    fn should_render_when_forecast_arrives() {
        let host = Arc::new(FakeHost::default());
        let mut card = attached_card(&host, json!({"entity": "weather.home"}));
        card.update();
        assert!(card.update().is_none());

        host.push_latest(payload()).unwrap();
        let Some(CardView::Card(body)) = card.update() else {
            panic!("expected a card render");
        };
        assert_eq!(body.forecast.unwrap().points.len(), 1);
    }

    #[tokio::test]
    async fn should_wake_up_when_forecast_is_pushed() {
        let host = Arc::new(FakeHost::default());
        let mut card = attached_card(&host, json!({"entity": "weather.home"}));
        card.update();
        host.push_latest(payload()).unwrap();

        assert!(card.forecast_changed().await);
        assert!(card.update().is_some());
    }

    #[test]
    fn should_fire_more_info_on_click() {
        let host = Arc::new(FakeHost::default());
        let card = attached_card(&host, json!({"entity": "weather.home"}));
        card.handle_click();
        let events = host.events.lock().unwrap();
        assert_eq!(events.as_slice(), &[HostEvent::more_info("weather.home")]);
    }

    #[test]
    fn should_report_fixed_card_size() {
        let card = WeatherCard::new(Arc::new(FakeHost::default()));
        assert_eq!(card.card_size(), 3);
    }

    #[test]
    fn should_unsubscribe_when_dropped() {
        let host = Arc::new(FakeHost::default());
        let mut card = attached_card(&host, json!({"entity": "weather.home"}));
        card.update();
        drop(card);
        assert_eq!(host.closed().len(), 1);
    }
}
