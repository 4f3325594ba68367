//! Sun entity — day/night flag and the next sunrise and sunset.

use crate::entity::EntitySnapshot;
use crate::time::{self, Timestamp};

/// State of `sun.sun` while the sun is down.
pub const BELOW_HORIZON: &str = "below_horizon";

/// Typed view of the `sun.sun` snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SunState {
    pub is_night: bool,
    pub next_rising: Option<Timestamp>,
    pub next_setting: Option<Timestamp>,
}

impl SunState {
    #[must_use]
    pub fn from_snapshot(snapshot: &EntitySnapshot) -> Self {
        let timestamp = |key: &str| {
            snapshot
                .attribute(key)
                .and_then(serde_json::Value::as_str)
                .and_then(time::parse)
        };
        Self {
            is_night: snapshot.state == BELOW_HORIZON,
            next_rising: timestamp("next_rising"),
            next_setting: timestamp("next_setting"),
        }
    }
}
