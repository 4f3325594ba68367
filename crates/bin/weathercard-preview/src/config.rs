//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `weathercard.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.

use serde::Deserialize;

use weathercard_adapter_virtual::demo::WEATHER_ENTITY_ID;
use weathercard_domain::config::{CardConfig, ForecastType};

use crate::error::PreviewError;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Card configuration, in the same shape the host would send.
    pub card: toml::Table,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Simulation settings.
    pub preview: PreviewConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// What the preview simulates after the first render.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Push a forecast through the subscription and render again.
    pub push_forecast: bool,
    /// Points in the pushed forecast.
    pub forecast_points: usize,
}

impl Config {
    /// Load configuration from `weathercard.toml` (if present), apply
    /// environment-variable overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting card configuration is invalid.
    pub fn load() -> Result<Self, PreviewError> {
        let mut config = Self::from_file("weathercard.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, PreviewError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(PreviewError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("WEATHERCARD_ENTITY") {
            self.card.insert("entity".to_string(), toml::Value::String(val));
        }
        if let Some(val) = var("WEATHERCARD_FORECAST_TYPE") {
            self.card
                .insert("forecast_type".to_string(), toml::Value::String(val));
        }
        if let Some(val) = var("WEATHERCARD_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), PreviewError> {
        if let Some(kind) = self.card.get("forecast_type") {
            let valid = kind
                .as_str()
                .is_some_and(|kind| kind.parse::<ForecastType>().is_ok());
            if !valid {
                return Err(PreviewError::Validation(format!(
                    "unknown forecast type {kind}"
                )));
            }
        }
        if self.preview.push_forecast && self.preview.forecast_points == 0 {
            return Err(PreviewError::Validation(
                "forecast_points must be non-zero".to_string(),
            ));
        }
        self.card_config().map(drop)
    }

    /// The card configuration, with the demo station as default entity.
    ///
    /// # Errors
    ///
    /// Returns an error when the `[card]` table is not a valid card
    /// configuration.
    pub fn card_config(&self) -> Result<CardConfig, PreviewError> {
        let mut card = self.card.clone();
        card.entry("entity")
            .or_insert_with(|| toml::Value::String(WEATHER_ENTITY_ID.to_string()));
        let value = serde_json::to_value(card)?;
        Ok(CardConfig::from_value(value)?)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "weathercard=info".to_string(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            push_forecast: true,
            forecast_points: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert!(config.card.is_empty());
        assert_eq!(config.logging.filter, "weathercard=info");
        assert!(config.preview.push_forecast);
        assert_eq!(config.preview.forecast_points, 5);
    }

    #[test]
    fn should_default_to_demo_station() {
        let card = Config::default().card_config().unwrap();
        assert_eq!(card.entity, "weather.virtual_home");
        assert_eq!(card.forecast_type, Some(ForecastType::Daily));
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [card]
            entity = 'weather.garden'
            name = 'Garden'
            forecast_type = 'hourly'
            number_of_forecasts = 8
            hide_precipitation = true

            [logging]
            filter = 'debug'

            [preview]
            push_forecast = false
            forecast_points = 12
        ";
        let config: Config = toml::from_str(toml).unwrap();
        let card = config.card_config().unwrap();
        assert_eq!(card.entity, "weather.garden");
        assert_eq!(card.name.as_deref(), Some("Garden"));
        assert_eq!(card.forecast_type, Some(ForecastType::Hourly));
        assert_eq!(card.number_of_forecasts, 8);
        assert!(card.hide_precipitation);
        assert_eq!(config.logging.filter, "debug");
        assert!(!config.preview.push_forecast);
        assert_eq!(config.preview.forecast_points, 12);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert!(config.card.is_empty());
    }

    #[test]
    fn should_apply_overrides() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "WEATHERCARD_ENTITY" => Some("weather.office".to_string()),
            "WEATHERCARD_FORECAST_TYPE" => Some("hourly".to_string()),
            "WEATHERCARD_LOG" => Some("weathercard=debug".to_string()),
            _ => None,
        });
        let card = config.card_config().unwrap();
        assert_eq!(card.entity, "weather.office");
        assert_eq!(card.forecast_type, Some(ForecastType::Hourly));
        assert_eq!(config.logging.filter, "weathercard=debug");
    }

    #[test]
    fn should_prefer_rust_log_over_weathercard_log() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "WEATHERCARD_LOG" => Some("warn".to_string()),
            "RUST_LOG" => Some("trace".to_string()),
            _ => None,
        });
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_reject_unknown_forecast_type() {
        let mut config = Config::default();
        config.apply_overrides(|key| {
            (key == "WEATHERCARD_FORECAST_TYPE").then(|| "weekly".to_string())
        });
        assert!(matches!(
            config.validate(),
            Err(PreviewError::Validation(_))
        ));
    }

    #[test]
    fn should_reject_blank_entity() {
        let config: Config = toml::from_str("[card]\nentity = ''").unwrap();
        assert!(matches!(config.validate(), Err(PreviewError::Card(_))));
    }

    #[test]
    fn should_reject_zero_forecast_points() {
        let mut config = Config::default();
        config.preview.forecast_points = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
