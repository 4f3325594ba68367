//! Display units for weather measurements.
//!
//! The entity's own `*_unit` attributes always win. Without one, the unit is
//! derived from the host's length unit: `km` means metric, anything else
//! means imperial.

use serde::{Deserialize, Serialize};

use crate::weather::WeatherAttributes;

/// Length unit that selects metric fallbacks.
pub const METRIC_LENGTH_UNIT: &str = "km";

/// Host-wide unit system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSystem {
    /// Length unit (`km` or `mi`).
    pub length: String,
    /// Temperature unit (`°C` or `°F`).
    pub temperature: String,
}

impl UnitSystem {
    /// The host's metric defaults.
    #[must_use]
    pub fn metric() -> Self {
        Self {
            length: METRIC_LENGTH_UNIT.to_string(),
            temperature: "\u{b0}C".to_string(),
        }
    }

    /// The host's imperial defaults.
    #[must_use]
    pub fn imperial() -> Self {
        Self {
            length: "mi".to_string(),
            temperature: "\u{b0}F".to_string(),
        }
    }
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self::metric()
    }
}

/// Measurement kinds the card shows a unit for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    AirPressure,
    Humidity,
    Precipitation,
    PrecipitationProbability,
    Visibility,
    WindSpeed,
    /// Any other measurement name; has no unit.
    Other,
}

impl From<&str> for Measure {
    fn from(name: &str) -> Self {
        match name {
            "air_pressure" => Self::AirPressure,
            "humidity" => Self::Humidity,
            "precipitation" => Self::Precipitation,
            "precipitation_probability" => Self::PrecipitationProbability,
            "visibility" => Self::Visibility,
            "wind_speed" => Self::WindSpeed,
            _ => Self::Other,
        }
    }
}

/// Resolve the display unit of `measure`.
#[must_use]
pub fn unit(measure: Measure, attributes: &WeatherAttributes, length_unit: &str) -> String {
    let metric = length_unit == METRIC_LENGTH_UNIT;
    let pick = |overridden: Option<&str>, metric_unit: &str, imperial_unit: &str| {
        let fallback = if metric { metric_unit } else { imperial_unit };
        overridden.unwrap_or(fallback).to_string()
    };
    match measure {
        Measure::AirPressure => pick(attributes.pressure_unit.as_deref(), "hPa", "inHg"),
        Measure::Humidity | Measure::PrecipitationProbability => "%".to_string(),
        Measure::Precipitation => pick(attributes.precipitation_unit.as_deref(), "mm", "in"),
        Measure::Visibility => attributes
            .visibility_unit
            .clone()
            .unwrap_or_else(|| length_unit.to_string()),
        Measure::WindSpeed => pick(attributes.wind_speed_unit.as_deref(), "km/h", "mph"),
        Measure::Other => String::new(),
    }
}

/// Resolve the temperature unit: entity attribute first, then the host's.
#[must_use]
pub fn temperature_unit(attributes: &WeatherAttributes, units: &UnitSystem) -> String {
    attributes
        .temperature_unit
        .clone()
        .unwrap_or_else(|| units.temperature.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_wind_unit(value: &str) -> WeatherAttributes {
        WeatherAttributes {
            wind_speed_unit: Some(value.to_string()),
            ..WeatherAttributes::default()
        }
    }

    #[test]
    fn should_always_use_percent_for_humidity() {
        let overridden = WeatherAttributes {
            precipitation_unit: Some("cm".to_string()),
            ..WeatherAttributes::default()
        };
        for length in ["km", "mi", ""] {
            assert_eq!(unit(Measure::Humidity, &overridden, length), "%");
            assert_eq!(unit(Measure::Humidity, &WeatherAttributes::default(), length), "%");
            assert_eq!(
                unit(Measure::PrecipitationProbability, &overridden, length),
                "%"
            );
        }
    }

    #[test]
    fn should_prefer_attribute_override_over_system_default() {
        assert_eq!(unit(Measure::WindSpeed, &with_wind_unit("m/s"), "km"), "m/s");
    }

    #[test]
    fn should_pick_pressure_unit_from_length_system() {
        let attrs = WeatherAttributes::default();
        assert_eq!(unit(Measure::AirPressure, &attrs, "mi"), "inHg");
        assert_eq!(unit(Measure::AirPressure, &attrs, "km"), "hPa");
    }

    #[test]
    fn should_pick_precipitation_and_wind_units_from_length_system() {
        let attrs = WeatherAttributes::default();
        assert_eq!(unit(Measure::Precipitation, &attrs, "km"), "mm");
        assert_eq!(unit(Measure::Precipitation, &attrs, "mi"), "in");
        assert_eq!(unit(Measure::WindSpeed, &attrs, "km"), "km/h");
        assert_eq!(unit(Measure::WindSpeed, &attrs, "mi"), "mph");
    }

    #[test]
    fn should_use_length_unit_itself_for_visibility() {
        let attrs = WeatherAttributes::default();
        assert_eq!(unit(Measure::Visibility, &attrs, "mi"), "mi");
        let overridden = WeatherAttributes {
            visibility_unit: Some("m".to_string()),
            ..WeatherAttributes::default()
        };
        assert_eq!(unit(Measure::Visibility, &overridden, "mi"), "m");
    }

    #[test]
    fn should_return_empty_string_for_unknown_measure() {
        let attrs = WeatherAttributes::default();
        assert_eq!(unit(Measure::from("dew_point"), &attrs, "km"), "");
        assert_eq!(unit(Measure::from("temperature"), &attrs, "km"), "");
    }

    #[test]
    fn should_parse_measure_names() {
        assert_eq!(Measure::from("air_pressure"), Measure::AirPressure);
        assert_eq!(Measure::from("wind_speed"), Measure::WindSpeed);
    }

    #[test]
    fn should_resolve_temperature_unit_from_attribute_then_host() {
        let attrs = WeatherAttributes::default();
        assert_eq!(temperature_unit(&attrs, &UnitSystem::imperial()), "\u{b0}F");
        let overridden = WeatherAttributes {
            temperature_unit: Some("\u{b0}C".to_string()),
            ..WeatherAttributes::default()
        };
        assert_eq!(
            temperature_unit(&overridden, &UnitSystem::imperial()),
            "\u{b0}C"
        );
    }
}
