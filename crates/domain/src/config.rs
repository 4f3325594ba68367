//! Card configuration — the user-supplied, immutable settings of one card.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of forecast points shown when the user does not pick one.
pub const DEFAULT_NUMBER_OF_FORECASTS: usize = 5;

/// How forecasts reach the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastType {
    /// One point per hour, streamed by the host.
    Hourly,
    /// One point per day, streamed by the host.
    #[default]
    Daily,
    /// Points embedded in the weather entity's `forecast` attribute.
    Legacy,
}

impl ForecastType {
    /// Whether this forecast type is delivered through a subscription.
    #[must_use]
    pub fn is_streamed(self) -> bool {
        !matches!(self, Self::Legacy)
    }

    /// Wire name used in subscribe messages and payload tags.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Legacy => "legacy",
        }
    }
}

impl std::fmt::Display for ForecastType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ForecastType {
    type Err = UnknownForecastType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "legacy" => Ok(Self::Legacy),
            other => Err(UnknownForecastType(other.to_string())),
        }
    }
}

/// A forecast type name that is not one of `hourly`, `daily`, `legacy`.
#[derive(Debug, thiserror::Error)]
#[error("unknown forecast type {0:?}")]
pub struct UnknownForecastType(pub String);

#[allow(clippy::unnecessary_wraps)]
fn default_forecast_type() -> Option<ForecastType> {
    Some(ForecastType::Daily)
}

fn default_true() -> bool {
    true
}

fn default_number_of_forecasts() -> usize {
    DEFAULT_NUMBER_OF_FORECASTS
}

/// User configuration of a weather card.
///
/// Only `entity` is required. Every toggle defaults to "shown", so
/// `{"entity": "weather.home"}` is a complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    /// Target weather entity (`weather.home`).
    #[serde(default)]
    pub entity: String,
    /// Title rendered next to the current conditions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_true")]
    pub current: bool,
    #[serde(default = "default_true")]
    pub details: bool,
    #[serde(default = "default_true")]
    pub forecast: bool,
    /// `None` when the user explicitly cleared it.
    #[serde(default = "default_forecast_type")]
    pub forecast_type: Option<ForecastType>,
    #[serde(default = "default_number_of_forecasts")]
    pub number_of_forecasts: usize,
    #[serde(default = "default_true")]
    pub show_forecast_wind_speed: bool,
    /// Base URL overriding the bundled icon set. Must end with `/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icons: Option<String>,
    #[serde(default)]
    pub hide_precipitation: bool,
}

impl CardConfig {
    /// Create a builder for constructing a [`CardConfig`].
    #[must_use]
    pub fn builder() -> CardConfigBuilder {
        CardConfigBuilder::default()
    }

    /// Decode and validate a configuration coming from the host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the value does not decode and
    /// [`ConfigError::MissingEntity`] when `entity` is missing or empty.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEntity`] when `entity` is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entity.trim().is_empty() {
            return Err(ConfigError::MissingEntity);
        }
        Ok(())
    }

    /// Forecast type to subscribe to, if the configuration calls for a
    /// subscription at all.
    ///
    /// `None` when the forecast block is disabled, the type is unset, or the
    /// type is [`ForecastType::Legacy`].
    #[must_use]
    pub fn streamed_forecast_type(&self) -> Option<ForecastType> {
        if !self.forecast {
            return None;
        }
        self.forecast_type.filter(|kind| kind.is_streamed())
    }

    /// Number of forecast points to render; zero falls back to the default.
    #[must_use]
    pub fn forecast_limit(&self) -> usize {
        if self.number_of_forecasts == 0 {
            DEFAULT_NUMBER_OF_FORECASTS
        } else {
            self.number_of_forecasts
        }
    }
}

/// Step-by-step builder for [`CardConfig`].
#[derive(Debug)]
pub struct CardConfigBuilder {
    inner: CardConfig,
}

impl Default for CardConfigBuilder {
    fn default() -> Self {
        Self {
            inner: CardConfig {
                entity: String::new(),
                name: None,
                current: true,
                details: true,
                forecast: true,
                forecast_type: default_forecast_type(),
                number_of_forecasts: DEFAULT_NUMBER_OF_FORECASTS,
                show_forecast_wind_speed: true,
                icons: None,
                hide_precipitation: false,
            },
        }
    }
}

impl CardConfigBuilder {
    #[must_use]
    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.inner.entity = entity.into();
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn current(mut self, enabled: bool) -> Self {
        self.inner.current = enabled;
        self
    }

    #[must_use]
    pub fn details(mut self, enabled: bool) -> Self {
        self.inner.details = enabled;
        self
    }

    #[must_use]
    pub fn forecast(mut self, enabled: bool) -> Self {
        self.inner.forecast = enabled;
        self
    }

    #[must_use]
    pub fn forecast_type(mut self, kind: Option<ForecastType>) -> Self {
        self.inner.forecast_type = kind;
        self
    }

    #[must_use]
    pub fn number_of_forecasts(mut self, count: usize) -> Self {
        self.inner.number_of_forecasts = count;
        self
    }

    #[must_use]
    pub fn show_forecast_wind_speed(mut self, enabled: bool) -> Self {
        self.inner.show_forecast_wind_speed = enabled;
        self
    }

    #[must_use]
    pub fn icons(mut self, base_url: impl Into<String>) -> Self {
        self.inner.icons = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn hide_precipitation(mut self, hide: bool) -> Self {
        self.inner.hide_precipitation = hide;
        self
    }

    /// Consume the builder, validate, and return a [`CardConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEntity`] if `entity` is missing or empty.
    pub fn build(self) -> Result<CardConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
