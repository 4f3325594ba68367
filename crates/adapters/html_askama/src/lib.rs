//! # weathercard-adapter-html-askama
//!
//! Renders a [`CardView`] to HTML with `askama` templates.
//!
//! The view tree already carries formatted values and resolved units; the
//! templates only lay them out. Markup follows the host's card conventions
//! (`ha-card`, `ha-icon`, `hui-warning`).

use askama::Template;

use weathercard_app::view::{CardBody, CardView, CurrentBlock, DetailItem, ForecastPointView, Reading};

/// Errors raised while rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

#[derive(Template)]
#[template(path = "not_available.html")]
struct NotAvailableTemplate<'a> {
    entity_id: &'a str,
}

#[derive(Template)]
#[template(path = "card.html")]
struct CardTemplate<'a> {
    entity_id: &'a str,
    current: Option<&'a CurrentBlock>,
    details: Option<DetailsRows>,
    forecast: Option<ForecastRows>,
}

struct DetailsRows {
    spacer: bool,
    cells: Vec<DetailCell>,
}

struct DetailCell {
    filler: bool,
    icon: &'static str,
    value: String,
    unit: String,
}

impl From<&DetailItem> for DetailCell {
    fn from(item: &DetailItem) -> Self {
        match item {
            DetailItem::Value { icon, value, unit } => Self {
                filler: false,
                icon: *icon,
                value: value.clone(),
                unit: unit.clone().unwrap_or_default(),
            },
            DetailItem::Filler => Self {
                filler: true,
                icon: "",
                value: String::new(),
                unit: String::new(),
            },
        }
    }
}

struct ForecastRows {
    spacer: bool,
    days: Vec<ForecastDay>,
}

struct ForecastDay {
    label: String,
    icon_url: String,
    high: String,
    low: String,
    precipitation: String,
    precipitation_probability: String,
    wind: Option<WindCell>,
}

struct WindCell {
    rotation: Option<f64>,
    speed: String,
    unit: String,
}

fn reading(reading: Option<&Reading>) -> String {
    reading
        .map(|reading| format!("{} {}", reading.value, reading.unit))
        .unwrap_or_default()
}

impl From<&ForecastPointView> for ForecastDay {
    fn from(point: &ForecastPointView) -> Self {
        Self {
            label: point.label.clone(),
            icon_url: point.icon_url.clone(),
            high: point.high.clone().unwrap_or_default(),
            low: point.low.clone().unwrap_or_default(),
            precipitation: reading(point.precipitation.as_ref()),
            precipitation_probability: reading(point.precipitation_probability.as_ref()),
            wind: point.wind.as_ref().map(|wind| WindCell {
                rotation: wind.rotation_degrees,
                speed: wind.speed.clone(),
                unit: wind.unit.clone(),
            }),
        }
    }
}

impl<'a> From<&'a CardBody> for CardTemplate<'a> {
    fn from(body: &'a CardBody) -> Self {
        Self {
            entity_id: &body.entity_id,
            current: body.current.as_ref(),
            details: body.details.as_ref().map(|details| DetailsRows {
                spacer: details.spacer,
                cells: details.items.iter().map(DetailCell::from).collect(),
            }),
            forecast: body.forecast.as_ref().map(|forecast| ForecastRows {
                spacer: forecast.spacer,
                days: forecast.points.iter().map(ForecastDay::from).collect(),
            }),
        }
    }
}

/// Render `view` to an HTML fragment.
///
/// [`CardView::Empty`] renders as an empty string.
///
/// # Errors
///
/// Returns [`RenderError::Template`] when a template fails to render.
pub fn render_html(view: &CardView) -> Result<String, RenderError> {
    let html = match view {
        CardView::Empty => String::new(),
        CardView::NotAvailable { entity_id } => NotAvailableTemplate { entity_id }.render()?,
        CardView::Card(body) => CardTemplate::from(body).render()?,
    };
    Ok(html)
}
