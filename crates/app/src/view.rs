//! View composition — host state in, view tree out.
//!
//! The view tree is markup-agnostic: every value is already formatted and
//! every unit resolved, so a renderer only lays things out.

use weathercard_domain::config::{CardConfig, ForecastType};
use weathercard_domain::forecast::{ForecastPayload, ForecastPoint};
use weathercard_domain::host::HostState;
use weathercard_domain::icon::icon;
use weathercard_domain::sun::SunState;
use weathercard_domain::time::{self, LabelFormat};
use weathercard_domain::unit::{Measure, temperature_unit, unit};
use weathercard_domain::weather::{WeatherAttributes, WeatherState};

/// Icon names of the details rows.
pub mod detail_icon {
    pub const HUMIDITY: &str = "mdi:water-percent";
    pub const WIND: &str = "mdi:weather-windy";
    pub const PRESSURE: &str = "mdi:gauge";
    pub const VISIBILITY: &str = "mdi:weather-fog";
    pub const SUNRISE: &str = "mdi:weather-sunset-up";
    pub const SUNSET: &str = "mdi:weather-sunset-down";
}

/// What the card shows.
#[derive(Debug, Clone, PartialEq)]
pub enum CardView {
    /// No configuration or no host state yet.
    Empty,
    /// The configured entity is unknown to the host.
    NotAvailable { entity_id: String },
    Card(CardBody),
}

/// The blocks of a card, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct CardBody {
    /// Entity whose detail view opens on click.
    pub entity_id: String,
    pub current: Option<CurrentBlock>,
    pub details: Option<DetailsBlock>,
    pub forecast: Option<ForecastBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentBlock {
    /// Set on every block but the first one rendered.
    pub spacer: bool,
    pub icon_url: String,
    pub condition: String,
    pub name: Option<String>,
    pub temperature: Option<String>,
    pub temperature_unit: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailsBlock {
    pub spacer: bool,
    pub items: Vec<DetailItem>,
}

/// One cell of the two-column details grid.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailItem {
    Value {
        icon: &'static str,
        value: String,
        unit: Option<String>,
    },
    /// Empty cell keeping sunrise and sunset on the same row.
    Filler,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastBlock {
    pub spacer: bool,
    pub points: Vec<ForecastPointView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPointView {
    /// Clock time for hourly forecasts, short weekday otherwise.
    pub label: String,
    pub icon_url: String,
    pub high: Option<String>,
    pub low: Option<String>,
    pub precipitation: Option<Reading>,
    pub precipitation_probability: Option<Reading>,
    pub wind: Option<WindView>,
}

/// A formatted value with its unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub value: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindView {
    /// Rotation of the direction arrow; `None` without a bearing.
    pub rotation_degrees: Option<f64>,
    pub speed: String,
    pub unit: String,
}

/// Compose the view for `config` against one host tick.
///
/// `streamed` is the latest subscription payload. It is used only when the
/// configuration streams its forecast; otherwise, and until the first push,
/// the forecast embedded in the entity is shown.
#[must_use]
pub fn render(
    config: &CardConfig,
    host: &HostState,
    streamed: Option<&ForecastPayload>,
) -> CardView {
    let Some(snapshot) = host.get_state(&config.entity) else {
        return CardView::NotAvailable {
            entity_id: config.entity.clone(),
        };
    };
    let weather = WeatherState::from_snapshot(snapshot);
    let sun = host.sun().map(|snapshot| SunState::from_snapshot(snapshot));
    let ctx = RenderContext {
        config,
        host,
        attributes: &weather.attributes,
        labels: host.label_format(),
    };

    let mut blocks = 0;
    let mut spacer = || {
        blocks += 1;
        blocks > 1
    };

    let current = config
        .current
        .then(|| ctx.current(&weather, sun.as_ref(), spacer()));
    let details = config.details.then(|| ctx.details(sun.as_ref(), spacer()));
    let forecast = if config.forecast {
        let embedded;
        let payload = match streamed {
            Some(payload) if config.streamed_forecast_type().is_some() => Some(payload),
            _ => {
                embedded = weather.attributes.forecast.clone().map(|points| {
                    ForecastPayload::new(config.forecast_type.unwrap_or_default(), points)
                });
                embedded.as_ref()
            }
        };
        payload
            .filter(|payload| !payload.is_empty())
            .map(|payload| ctx.forecast(payload, spacer()))
    } else {
        None
    };

    CardView::Card(CardBody {
        entity_id: config.entity.clone(),
        current,
        details,
        forecast,
    })
}

struct RenderContext<'a> {
    config: &'a CardConfig,
    host: &'a HostState,
    attributes: &'a WeatherAttributes,
    labels: LabelFormat,
}

impl RenderContext<'_> {
    fn unit(&self, measure: Measure) -> String {
        unit(measure, self.attributes, &self.host.unit_system.length)
    }

    fn temperature_unit(&self) -> String {
        temperature_unit(self.attributes, &self.host.unit_system)
    }

    fn icon(&self, condition: &str, is_night: bool) -> String {
        icon(condition, is_night, self.config.icons.as_deref())
    }

    fn current(&self, weather: &WeatherState, sun: Option<&SunState>, spacer: bool) -> CurrentBlock {
        let is_night = sun.is_some_and(|sun| sun.is_night);
        let temperature_unit = self.temperature_unit();
        let temperature = self.attributes.temperature.map(|value| {
            if temperature_unit == "\u{b0}F" {
                format_number(value.round())
            } else {
                format_number(value)
            }
        });
        CurrentBlock {
            spacer,
            icon_url: self.icon(&weather.condition, is_night),
            condition: weather.condition.clone(),
            name: self.config.name.clone(),
            temperature,
            temperature_unit,
        }
    }

    fn details(&self, sun: Option<&SunState>, spacer: bool) -> DetailsBlock {
        let attrs = self.attributes;
        let mut items = Vec::new();

        if let Some(humidity) = attrs.humidity {
            items.push(DetailItem::Value {
                icon: detail_icon::HUMIDITY,
                value: format_number(humidity),
                unit: Some(self.unit(Measure::Humidity)),
            });
        }
        if let Some(speed) = attrs.wind_speed {
            let direction = attrs
                .wind_bearing
                .as_ref()
                .and_then(|bearing| bearing.compass_label());
            let value = match direction {
                Some(direction) => format!("{direction} {}", format_number(speed)),
                None => format_number(speed),
            };
            items.push(DetailItem::Value {
                icon: detail_icon::WIND,
                value,
                unit: Some(self.unit(Measure::WindSpeed)),
            });
        }
        if let Some(pressure) = attrs.pressure {
            items.push(DetailItem::Value {
                icon: detail_icon::PRESSURE,
                value: format_number(pressure),
                unit: Some(self.unit(Measure::AirPressure)),
            });
        }
        if let Some(visibility) = attrs.visibility {
            items.push(DetailItem::Value {
                icon: detail_icon::VISIBILITY,
                value: format_number(visibility),
                unit: Some(self.unit(Measure::Visibility)),
            });
        }

        if let Some(sun) = sun {
            let rows: Vec<_> = [
                (detail_icon::SUNRISE, sun.next_rising.as_ref()),
                (detail_icon::SUNSET, sun.next_setting.as_ref()),
            ]
            .into_iter()
            .filter_map(|(icon, ts)| {
                ts.map(|ts| DetailItem::Value {
                    icon,
                    value: self.labels.clock_time(ts),
                    unit: None,
                })
            })
            .collect();
            if !rows.is_empty() && items.len() % 2 == 1 {
                items.push(DetailItem::Filler);
            }
            items.extend(rows);
        }

        DetailsBlock { spacer, items }
    }

    fn forecast(&self, payload: &ForecastPayload, spacer: bool) -> ForecastBlock {
        let points = payload
            .forecast
            .iter()
            .take(self.config.forecast_limit())
            .map(|point| self.forecast_point(payload.forecast_type, point))
            .collect();
        ForecastBlock { spacer, points }
    }

    fn forecast_point(&self, kind: ForecastType, point: &ForecastPoint) -> ForecastPointView {
        let temperature_unit = self.temperature_unit();
        let label = match time::parse(&point.datetime) {
            Some(ts) if kind == ForecastType::Hourly => self.labels.clock_time(&ts),
            Some(ts) => self.labels.short_weekday(&ts),
            None => point.datetime.clone(),
        };
        let show_precipitation = !self.config.hide_precipitation;

        ForecastPointView {
            label,
            icon_url: self.icon(&point.condition, false),
            high: point
                .temperature
                .map(|value| format!("{}{temperature_unit}", format_number(value))),
            low: point
                .templow
                .map(|value| format!("{}{temperature_unit}", format_number(value))),
            precipitation: point
                .precipitation
                .filter(|_| show_precipitation)
                .map(|value| Reading {
                    value: format_number((value * 10.0).round() / 10.0),
                    unit: self.unit(Measure::Precipitation),
                }),
            precipitation_probability: point
                .precipitation_probability
                .filter(|_| show_precipitation)
                .map(|value| Reading {
                    value: format_number(value.round()),
                    unit: self.unit(Measure::PrecipitationProbability),
                }),
            wind: point
                .wind_speed
                .filter(|_| self.config.show_forecast_wind_speed)
                .map(|speed| WindView {
                    rotation_degrees: point
                        .wind_bearing
                        .as_ref()
                        .and_then(|bearing| bearing.rotation_degrees()),
                    speed: format_number(speed.round()),
                    unit: self.unit(Measure::WindSpeed),
                }),
        }
    }
}

/// Shortest decimal form: `21.5`, `60`, `-3`.
fn format_number(value: f64) -> String {
    if value == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    value.to_string()
}
