//! Simulated entities — a weather station and the sun.
//!
//! Values are derived from the timestamps they describe, so the same inputs
//! always produce the same snapshots and forecasts.

mod station;
mod sun;

pub use station::VirtualWeatherStation;
pub use sun::VirtualSun;

use chrono::{DateTime, TimeZone, Utc};

use weathercard_domain::host::HostState;
use weathercard_domain::unit::UnitSystem;

/// Entity id of the simulated weather station.
pub const WEATHER_ENTITY_ID: &str = "weather.virtual_home";

/// Fixed instant the demo is anchored at.
#[must_use]
pub fn demo_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 14, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Host tick with the station and the sun at [`demo_epoch`].
#[must_use]
pub fn demo_state() -> HostState {
    let now = demo_epoch();
    HostState {
        language: "en".to_string(),
        time_zone: Some("UTC".to_string()),
        unit_system: UnitSystem::metric(),
        ..HostState::default()
    }
    .with_entity(VirtualWeatherStation::default().snapshot(now))
    .with_entity(VirtualSun::default().snapshot(now))
}
