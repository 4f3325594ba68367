//! Weather entity — typed view over a `weather.*` snapshot.

use serde::{Deserialize, Serialize};

use crate::entity::EntitySnapshot;
use crate::forecast::ForecastPoint;
use crate::wind::WindBearing;

/// Attributes the card reads from a weather entity.
///
/// Every field is optional: providers only publish what they measure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherAttributes {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub visibility: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_bearing: Option<WindBearing>,
    pub temperature_unit: Option<String>,
    pub pressure_unit: Option<String>,
    pub precipitation_unit: Option<String>,
    pub visibility_unit: Option<String>,
    pub wind_speed_unit: Option<String>,
    /// Forecast embedded by providers that predate forecast subscriptions.
    pub forecast: Option<Vec<ForecastPoint>>,
}

impl WeatherAttributes {
    /// Decode the attributes of a snapshot.
    ///
    /// Fields that do not decode are dropped one by one, so one malformed
    /// value never hides the rest.
    #[must_use]
    pub fn from_snapshot(snapshot: &EntitySnapshot) -> Self {
        let attrs = &snapshot.attributes;
        let field = |key: &str| attrs.get(key).cloned().unwrap_or_default();
        Self {
            temperature: decode(field("temperature")),
            humidity: decode(field("humidity")),
            pressure: decode(field("pressure")),
            visibility: decode(field("visibility")),
            wind_speed: decode(field("wind_speed")),
            wind_bearing: decode(field("wind_bearing")),
            temperature_unit: decode(field("temperature_unit")),
            pressure_unit: decode(field("pressure_unit")),
            precipitation_unit: decode(field("precipitation_unit")),
            visibility_unit: decode(field("visibility_unit")),
            wind_speed_unit: decode(field("wind_speed_unit")),
            forecast: decode::<Vec<serde_json::Value>>(field("forecast"))
                .map(|points| points.into_iter().filter_map(decode::<ForecastPoint>).collect()),
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Option<T> {
    if value.is_null() {
        return None;
    }
    serde_json::from_value(value).ok()
}

/// Current weather of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherState {
    pub entity_id: String,
    /// Condition code as reported (`cloudy`, `lightning-rainy`, …).
    pub condition: String,
    pub attributes: WeatherAttributes,
}

impl WeatherState {
    /// Typed view of a weather snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &EntitySnapshot) -> Self {
        Self {
            entity_id: snapshot.entity_id.clone(),
            condition: snapshot.state.clone(),
            attributes: WeatherAttributes::from_snapshot(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_decode_known_attributes() {
        let snapshot = EntitySnapshot::new("weather.home", "rainy")
            .with_attribute("temperature", 12.5)
            .with_attribute("humidity", 81)
            .with_attribute("wind_bearing", "SW")
            .with_attribute("pressure_unit", "mbar");
        let state = WeatherState::from_snapshot(&snapshot);
        assert_eq!(state.condition, "rainy");
        assert_eq!(state.attributes.temperature, Some(12.5));
        assert_eq!(state.attributes.humidity, Some(81.0));
        assert_eq!(
            state.attributes.wind_bearing,
            Some(WindBearing::Label("SW".to_string()))
        );
        assert_eq!(state.attributes.pressure_unit.as_deref(), Some("mbar"));
        assert!(state.attributes.forecast.is_none());
    }

    #[test]
    fn should_drop_malformed_fields_only() {
        let snapshot = EntitySnapshot::new("weather.home", "sunny")
            .with_attribute("temperature", "warm")
            .with_attribute("humidity", 40);
        let attrs = WeatherAttributes::from_snapshot(&snapshot);
        assert_eq!(attrs.temperature, None);
        assert_eq!(attrs.humidity, Some(40.0));
    }

    #[test]
    fn should_decode_embedded_forecast() {
        let snapshot = EntitySnapshot::new("weather.home", "sunny").with_attribute(
            "forecast",
            json!([
                {"datetime": "2024-05-01T12:00:00+00:00", "condition": "sunny", "temperature": 20},
                {"datetime": "2024-05-02T12:00:00+00:00", "condition": "rainy", "temperature": 15, "templow": 9}
            ]),
        );
        let attrs = WeatherAttributes::from_snapshot(&snapshot);
        let forecast = attrs.forecast.unwrap();
        assert_eq!(forecast.len(), 2);
        assert_eq!(forecast[1].templow, Some(9.0));
    }

    #[test]
    fn should_keep_valid_forecast_points_when_one_is_malformed() {
        let snapshot = EntitySnapshot::new("weather.home", "sunny").with_attribute(
            "forecast",
            json!([
                {"condition": "sunny", "temperature": 20},
                {"datetime": "2024-05-02T12:00:00+00:00", "condition": null, "temperature": 15},
                {"datetime": "2024-05-03T12:00:00+00:00", "condition": "rainy", "temperature": 12}
            ]),
        );
        let forecast = WeatherAttributes::from_snapshot(&snapshot).forecast.unwrap();
        assert_eq!(forecast.len(), 2);
        assert_eq!(forecast[0].datetime, "2024-05-02T12:00:00+00:00");
        assert_eq!(forecast[0].condition, "");
        assert_eq!(forecast[1].condition, "rainy");
    }

    #[test]
    fn should_treat_null_as_absent() {
        let snapshot =
            EntitySnapshot::new("weather.home", "sunny").with_attribute("visibility", json!(null));
        assert_eq!(WeatherAttributes::from_snapshot(&snapshot).visibility, None);
    }
}
