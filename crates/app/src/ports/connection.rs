//! Connection port — the host's real-time forecast channel.
//!
//! Opening a subscription never blocks: the host returns an unsubscribe handle
//! right away and pushes payloads into the [`ForecastSink`] whenever it has
//! one. Unsubscribing is fire-and-forget.

use std::sync::Arc;

use tokio::sync::mpsc;

use weathercard_domain::config::ForecastType;
use weathercard_domain::forecast::ForecastPayload;

/// Message type of the host's forecast subscription command.
pub const SUBSCRIBE_FORECAST: &str = "weather/subscribe_forecast";

/// Errors reported by the host connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// The other end is gone.
    #[error("connection closed")]
    Closed,

    /// The host refused the command.
    #[error("host rejected the command: {0}")]
    Rejected(String),
}

/// What the card subscribes to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForecastRequest {
    pub entity_id: String,
    pub forecast_type: ForecastType,
}

impl ForecastRequest {
    #[must_use]
    pub fn new(entity_id: impl Into<String>, forecast_type: ForecastType) -> Self {
        Self {
            entity_id: entity_id.into(),
            forecast_type,
        }
    }

    /// The subscribe command as sent over the host's websocket.
    #[must_use]
    pub fn message(&self) -> serde_json::Value {
        serde_json::json!({
            "type": SUBSCRIBE_FORECAST,
            "forecast_type": self.forecast_type,
            "entity_id": self.entity_id,
        })
    }
}

/// Sending half of a subscription's payload channel, handed to the host.
#[derive(Debug, Clone)]
pub struct ForecastSink {
    sender: mpsc::UnboundedSender<ForecastPayload>,
}

impl ForecastSink {
    /// Create a sink together with the receiver the card keeps.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ForecastPayload>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Push a payload to the card.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Closed`] once the card dropped the
    /// subscription; the payload is discarded.
    pub fn deliver(&self, payload: ForecastPayload) -> Result<(), ConnectionError> {
        self.sender
            .send(payload)
            .map_err(|_| ConnectionError::Closed)
    }

    /// Whether the card stopped listening.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Cancels one forecast subscription.
pub trait ForecastUnsubscribe: Send {
    /// Ask the host to stop the subscription.
    ///
    /// Must not block. Callers treat failures as best-effort cleanup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConnectionError`] when the host could not be told.
    fn unsubscribe(self: Box<Self>) -> Result<(), ConnectionError>;
}

/// Opens forecast subscriptions on the host.
pub trait ForecastConnection {
    /// Start streaming forecasts for `request` into `sink`.
    ///
    /// Returns immediately. A host that never delivers simply leaves the
    /// card without a streamed forecast.
    fn subscribe_forecast(
        &self,
        request: ForecastRequest,
        sink: ForecastSink,
    ) -> Box<dyn ForecastUnsubscribe>;
}

impl<T: ForecastConnection + ?Sized> ForecastConnection for Arc<T> {
    fn subscribe_forecast(
        &self,
        request: ForecastRequest,
        sink: ForecastSink,
    ) -> Box<dyn ForecastUnsubscribe> {
        (**self).subscribe_forecast(request, sink)
    }
}

impl<T: ForecastConnection + ?Sized> ForecastConnection for &T {
    fn subscribe_forecast(
        &self,
        request: ForecastRequest,
        sink: ForecastSink,
    ) -> Box<dyn ForecastUnsubscribe> {
        (**self).subscribe_forecast(request, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_subscribe_message() {
        let request = ForecastRequest::new("weather.home", ForecastType::Hourly);
        assert_eq!(
            request.message(),
            serde_json::json!({
                "type": "weather/subscribe_forecast",
                "forecast_type": "hourly",
                "entity_id": "weather.home",
            })
        );
    }

    #[tokio::test]
    async fn should_deliver_payload_to_receiver() {
        let (sink, mut rx) = ForecastSink::channel();
        sink.deliver(ForecastPayload::new(ForecastType::Daily, Vec::new()))
            .unwrap();
        let received = rx.recv().await.unwrap();
        assert_eq!(received.forecast_type, ForecastType::Daily);
    }

    #[test]
    fn should_report_closed_once_receiver_is_dropped() {
        let (sink, rx) = ForecastSink::channel();
        drop(rx);
        assert!(sink.is_closed());
        let result = sink.deliver(ForecastPayload::new(ForecastType::Daily, Vec::new()));
        assert!(matches!(result, Err(ConnectionError::Closed)));
    }
}
