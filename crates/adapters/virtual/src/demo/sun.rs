//! Virtual sun with fixed daily sunrise and sunset times.

use chrono::{DateTime, Duration, NaiveTime, Utc};

use weathercard_domain::entity::{EntitySnapshot, SUN_ENTITY_ID};
use weathercard_domain::sun::BELOW_HORIZON;

const ABOVE_HORIZON: &str = "above_horizon";

/// Simulated `sun.sun` entity.
#[derive(Debug, Clone, Copy)]
pub struct VirtualSun {
    pub sunrise: NaiveTime,
    pub sunset: NaiveTime,
}

impl Default for VirtualSun {
    fn default() -> Self {
        Self {
            sunrise: NaiveTime::from_hms_opt(5, 30, 0).unwrap_or_default(),
            sunset: NaiveTime::from_hms_opt(19, 30, 0).unwrap_or_default(),
        }
    }
}

impl VirtualSun {
    fn next_at(now: DateTime<Utc>, time: NaiveTime) -> DateTime<Utc> {
        let today = now.date_naive().and_time(time).and_utc();
        if today > now {
            today
        } else {
            today + Duration::days(1)
        }
    }

    #[must_use]
    pub fn is_up(&self, now: DateTime<Utc>) -> bool {
        let time = now.time();
        time >= self.sunrise && time < self.sunset
    }

    #[must_use]
    pub fn snapshot(&self, now: DateTime<Utc>) -> EntitySnapshot {
        let state = if self.is_up(now) {
            ABOVE_HORIZON
        } else {
            BELOW_HORIZON
        };
        EntitySnapshot::new(SUN_ENTITY_ID, state)
            .with_attribute("next_rising", Self::next_at(now, self.sunrise).to_rfc3339())
            .with_attribute("next_setting", Self::next_at(now, self.sunset).to_rfc3339())
    }
}
