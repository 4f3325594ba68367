//! Registration — how the card presents itself to the host.
//!
//! Nothing here touches global state: the host calls [`registration`] once
//! when it loads the card and keeps the descriptor wherever it wants.

use serde::Serialize;

use weathercard_domain::config::DEFAULT_NUMBER_OF_FORECASTS;
use weathercard_domain::entity::{WEATHER_DOMAIN, entity_domain};

/// Element/type name the card registers under.
pub const CARD_TYPE: &str = "weather-card";

/// Entry for the host's card picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRegistration {
    #[serde(rename = "type")]
    pub type_name: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub preview: bool,
    #[serde(rename = "documentationURL")]
    pub documentation_url: &'static str,
}

/// Describe the card for the host's card picker.
#[must_use]
pub fn registration() -> CardRegistration {
    CardRegistration {
        type_name: CARD_TYPE,
        name: "Weather Card",
        description: "A custom weather card with animated icons.",
        preview: true,
        documentation_url: "https://github.com/avee87/weather-card",
    }
}

/// Input widget the host's settings editor shows for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    Entity { domain: &'static str },
    Text {},
    Boolean {},
    Number {},
    Select { options: Vec<SelectOption> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// One field of the settings editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    pub selector: Selector,
}

impl FormField {
    fn new(name: &'static str, selector: Selector) -> Self {
        Self {
            name,
            required: false,
            default: None,
            selector,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn default_value(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Schema of the host's settings editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigForm {
    pub schema: Vec<FormField>,
}

/// Settings editor schema for the card configuration.
#[must_use]
pub fn config_form() -> ConfigForm {
    ConfigForm {
        schema: vec![
            FormField::new(
                "entity",
                Selector::Entity {
                    domain: WEATHER_DOMAIN,
                },
            )
            .required(),
            FormField::new("name", Selector::Text {}),
            FormField::new("current", Selector::Boolean {}).default_value(true),
            FormField::new("details", Selector::Boolean {}).default_value(true),
            FormField::new("forecast", Selector::Boolean {}).default_value(true),
            FormField::new(
                "forecast_type",
                Selector::Select {
                    options: vec![
                        SelectOption {
                            value: "hourly",
                            label: "Hourly",
                        },
                        SelectOption {
                            value: "daily",
                            label: "Daily",
                        },
                    ],
                },
            )
            .default_value("daily"),
            FormField::new("number_of_forecasts", Selector::Number {})
                .default_value(DEFAULT_NUMBER_OF_FORECASTS),
            FormField::new("show_forecast_wind_speed", Selector::Boolean {}).default_value(true),
        ],
    }
}

/// Configuration the host uses when the user adds a fresh card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StubConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

/// Pick a weather entity for a fresh card: an unused one if possible,
/// otherwise any.
#[must_use]
pub fn stub_config<'a, U, A>(unused_entities: U, all_entities: A) -> StubConfig
where
    U: IntoIterator<Item = &'a str>,
    A: IntoIterator<Item = &'a str>,
{
    let is_weather = |entity_id: &&str| entity_domain(entity_id) == WEATHER_DOMAIN;
    let entity = unused_entities
        .into_iter()
        .find(is_weather)
        .or_else(|| all_entities.into_iter().find(is_weather))
        .map(str::to_string);
    StubConfig { entity }
}
