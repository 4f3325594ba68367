//! Virtual weather station — current conditions and forecasts.

use std::f64::consts::TAU;

use chrono::{DateTime, Duration, Timelike, Utc};

use weathercard_domain::config::ForecastType;
use weathercard_domain::entity::EntitySnapshot;
use weathercard_domain::forecast::{ForecastPayload, ForecastPoint};
use weathercard_domain::wind::WindBearing;

use super::WEATHER_ENTITY_ID;

const CONDITIONS: [&str; 8] = [
    "sunny",
    "partlycloudy",
    "cloudy",
    "rainy",
    "partlycloudy",
    "lightning-rainy",
    "sunny",
    "windy",
];

/// A simulated weather provider.
#[derive(Debug, Clone)]
pub struct VirtualWeatherStation {
    entity_id: String,
    /// Daily mean temperature in °C.
    mean_temperature: f64,
}

impl Default for VirtualWeatherStation {
    fn default() -> Self {
        Self {
            entity_id: WEATHER_ENTITY_ID.to_string(),
            mean_temperature: 16.0,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn slot(at: DateTime<Utc>, len: usize) -> usize {
    (at.timestamp() / 3600).rem_euclid(len as i64) as usize
}

impl VirtualWeatherStation {
    /// Station publishing under `entity_id`.
    #[must_use]
    pub fn new(entity_id: impl Into<String>, mean_temperature: f64) -> Self {
        Self {
            entity_id: entity_id.into(),
            mean_temperature,
        }
    }

    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    fn temperature_at(&self, at: DateTime<Utc>) -> f64 {
        // coldest at 03:00, warmest at 15:00
        let phase = (f64::from(at.hour()) - 9.0) / 24.0 * TAU;
        round1(self.mean_temperature + 6.0 * phase.sin())
    }

    fn condition_at(at: DateTime<Utc>) -> &'static str {
        CONDITIONS[slot(at, CONDITIONS.len())]
    }

    #[allow(clippy::cast_precision_loss)]
    fn bearing_at(at: DateTime<Utc>) -> f64 {
        (slot(at, 16) as f64 * 22.5 + 7.0) % 360.0
    }

    /// Current conditions at `now`, with a legacy daily forecast embedded.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn snapshot(&self, now: DateTime<Utc>) -> EntitySnapshot {
        let legacy = self.forecast(ForecastType::Legacy, now, 5);
        EntitySnapshot::new(&self.entity_id, Self::condition_at(now))
            .with_attribute("temperature", self.temperature_at(now))
            .with_attribute("humidity", 55 + slot(now, 30))
            .with_attribute("pressure", 1008 + slot(now, 12))
            .with_attribute("visibility", 10)
            .with_attribute("wind_speed", round1(8.0 + slot(now, 7) as f64 * 1.5))
            .with_attribute("wind_bearing", Self::bearing_at(now))
            .with_attribute("temperature_unit", "\u{b0}C")
            .with_attribute("pressure_unit", "hPa")
            .with_attribute("wind_speed_unit", "km/h")
            .with_attribute("visibility_unit", "km")
            .with_attribute("precipitation_unit", "mm")
            .with_attribute(
                "forecast",
                serde_json::to_value(legacy.forecast).unwrap_or_default(),
            )
    }

    /// `count` forecast points starting after `from`.
    ///
    /// Hourly forecasts step by one hour, daily and legacy ones by one day
    /// at noon.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn forecast(&self, kind: ForecastType, from: DateTime<Utc>, count: usize) -> ForecastPayload {
        let (first, step) = match kind {
            ForecastType::Hourly => (
                from.with_minute(0).and_then(|ts| ts.with_second(0)).unwrap_or(from)
                    + Duration::hours(1),
                Duration::hours(1),
            ),
            ForecastType::Daily | ForecastType::Legacy => (
                from.with_hour(12)
                    .and_then(|ts| ts.with_minute(0))
                    .and_then(|ts| ts.with_second(0))
                    .unwrap_or(from)
                    + Duration::days(1),
                Duration::days(1),
            ),
        };

        let points = (0..count)
            .scan(first, |at, _| {
                let current = *at;
                *at += step;
                Some(current)
            })
            .map(|at| {
                let condition = Self::condition_at(at);
                let wet = condition.contains("rain");
                let mut point =
                    ForecastPoint::new(at.to_rfc3339(), condition, self.temperature_at(at));
                if kind != ForecastType::Hourly {
                    point.temperature = Some(round1(self.mean_temperature + 5.0));
                    point.templow = Some(round1(self.mean_temperature - 6.0));
                }
                point.precipitation = Some(if wet { round1(0.8 + slot(at, 5) as f64) } else { 0.0 });
                point.precipitation_probability =
                    Some(if wet { 60.0 + slot(at, 4) as f64 * 10.0 } else { 5.0 });
                point.wind_speed = Some(round1(6.0 + slot(at, 9) as f64 * 1.7));
                point.wind_bearing = Some(WindBearing::Degrees(Self::bearing_at(at)));
                point
            })
            .collect();

        ForecastPayload::new(kind, points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_epoch;
    use weathercard_domain::weather::WeatherState;

    #[test]
    fn should_publish_weather_snapshot() {
        let station = VirtualWeatherStation::default();
        let state = WeatherState::from_snapshot(&station.snapshot(demo_epoch()));
        assert_eq!(state.entity_id, "weather.virtual_home");
        assert!(CONDITIONS.contains(&state.condition.as_str()));
        assert!(state.attributes.temperature.is_some());
        assert!(state.attributes.wind_bearing.is_some());
        assert_eq!(state.attributes.forecast.map(|points| points.len()), Some(5));
    }

    #[test]
    fn should_step_hourly_forecast_by_one_hour() {
        let station = VirtualWeatherStation::default();
        let payload = station.forecast(ForecastType::Hourly, demo_epoch(), 3);
        let times: Vec<_> = payload
            .forecast
            .iter()
            .map(|point| point.datetime.as_str())
            .collect();
        assert_eq!(
            times,
            [
                "2024-05-01T15:00:00+00:00",
                "2024-05-01T16:00:00+00:00",
                "2024-05-01T17:00:00+00:00"
            ]
        );
    }

    #[test]
    fn should_step_daily_forecast_by_one_day_at_noon() {
        let station = VirtualWeatherStation::default();
        let payload = station.forecast(ForecastType::Daily, demo_epoch(), 2);
        assert_eq!(payload.forecast_type, ForecastType::Daily);
        assert_eq!(payload.forecast[0].datetime, "2024-05-02T12:00:00+00:00");
        assert_eq!(payload.forecast[1].datetime, "2024-05-03T12:00:00+00:00");
        assert!(payload.forecast[0].templow.is_some());
    }

    #[test]
    fn should_be_deterministic() {
        let station = VirtualWeatherStation::new("weather.lab", 10.0);
        assert_eq!(
            station.forecast(ForecastType::Daily, demo_epoch(), 4),
            station.forecast(ForecastType::Daily, demo_epoch(), 4)
        );
        assert_eq!(station.entity_id(), "weather.lab");
    }
}
