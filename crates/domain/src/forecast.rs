//! Forecasts — ordered future time slices of one weather entity.

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::ForecastType;
use crate::wind::WindBearing;

/// One future time slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Start of the slice, RFC 3339.
    pub datetime: String,
    /// Condition code; empty when the provider sent none or `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub condition: String,
    /// High temperature (or the temperature for hourly slices).
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templow: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_bearing: Option<WindBearing>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ForecastPoint {
    /// A slice with only the mandatory fields set.
    #[must_use]
    pub fn new(datetime: impl Into<String>, condition: impl Into<String>, temperature: f64) -> Self {
        Self {
            datetime: datetime.into(),
            condition: condition.into(),
            temperature: Some(temperature),
            templow: None,
            precipitation: None,
            precipitation_probability: None,
            wind_speed: None,
            wind_bearing: None,
        }
    }
}

/// A complete forecast as pushed by the host or embedded in the entity.
///
/// Replaced wholesale on every push, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    #[serde(rename = "type")]
    pub forecast_type: ForecastType,
    #[serde(default)]
    pub forecast: Vec<ForecastPoint>,
}

impl ForecastPayload {
    #[must_use]
    pub fn new(forecast_type: ForecastType, forecast: Vec<ForecastPoint>) -> Self {
        Self {
            forecast_type,
            forecast,
        }
    }

    /// Whether there is anything to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forecast.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_subscription_event() {
        let json = r#"{
            "type": "hourly",
            "forecast": [
                {"datetime": "2024-05-01T13:00:00+00:00", "condition": "cloudy", "temperature": 14.2,
                 "precipitation": 0.4, "precipitation_probability": 35, "wind_speed": 11.8, "wind_bearing": 250}
            ]
        }"#;
        let payload: ForecastPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.forecast_type, ForecastType::Hourly);
        assert_eq!(payload.forecast.len(), 1);
        let point = &payload.forecast[0];
        assert_eq!(point.precipitation_probability, Some(35.0));
        assert_eq!(point.wind_bearing, Some(WindBearing::Degrees(250.0)));
    }

    #[test]
    fn should_default_missing_forecast_to_empty() {
        let payload: ForecastPayload = serde_json::from_str(r#"{"type": "daily"}"#).unwrap();
        assert!(payload.is_empty());
    }
}
