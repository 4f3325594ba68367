//! Port definitions — traits that the host (or an adapter standing in for
//! it) implements.
//!
//! Ports are the boundaries between the card and its host. They are defined
//! here (in `app`) so that both the card and the adapters can depend on them
//! without creating circular dependencies.

pub mod connection;
pub mod events;

pub use connection::{
    ConnectionError, ForecastConnection, ForecastRequest, ForecastSink, ForecastUnsubscribe,
};
pub use events::{EventDispatcher, HostEvent};
