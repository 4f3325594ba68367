//! Event port — notifications the card sends up to the host.

use std::sync::Arc;

use serde::Serialize;

/// Event type that makes the host open an entity's detail dialog.
pub const MORE_INFO: &str = "hass-more-info";

/// An event dispatched from the card to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub detail: serde_json::Value,
    pub bubbles: bool,
    pub cancelable: bool,
    pub composed: bool,
}

impl HostEvent {
    /// Bubbling, composed, non-cancelable event.
    #[must_use]
    pub fn new(event_type: impl Into<String>, detail: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            detail,
            bubbles: true,
            cancelable: false,
            composed: true,
        }
    }

    /// Ask the host to show the detail view of `entity_id`.
    #[must_use]
    pub fn more_info(entity_id: &str) -> Self {
        Self::new(MORE_INFO, serde_json::json!({ "entityId": entity_id }))
    }
}

/// Delivers card events to the host.
pub trait EventDispatcher {
    fn fire_event(&self, event: HostEvent);
}

impl<T: EventDispatcher + ?Sized> EventDispatcher for Arc<T> {
    fn fire_event(&self, event: HostEvent) {
        (**self).fire_event(event);
    }
}

impl<T: EventDispatcher + ?Sized> EventDispatcher for &T {
    fn fire_event(&self, event: HostEvent) {
        (**self).fire_event(event);
    }
}
