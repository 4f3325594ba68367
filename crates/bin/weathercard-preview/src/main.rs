//! # weathercard-preview — weather card preview
//!
//! Composition root that wires the weather card to the virtual host and
//! prints the rendered card.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Construct the virtual host and the card
//! - Drive one attach / render / forecast push / render / click / detach cycle
//! - Print the HTML of the last render to stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod error;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use weathercard_adapter_html_askama::render_html;
use weathercard_adapter_virtual::VirtualHost;
use weathercard_adapter_virtual::demo::{VirtualWeatherStation, demo_epoch};
use weathercard_app::card::WeatherCard;
use weathercard_app::lifecycle::CardLifecycle;
use weathercard_app::view::CardView;

use crate::config::Config;
use crate::error::PreviewError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load weathercard.toml")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let html = preview(&config).await?;
    println!("{html}");
    Ok(())
}

async fn preview(config: &Config) -> Result<String, PreviewError> {
    let host = VirtualHost::demo();
    let mut card = WeatherCard::new(host.clone());
    card.set_card_config(config.card_config()?)?;
    card.set_host(host.state());
    card.on_attach();

    let mut view = card.update().unwrap_or(CardView::Empty);
    tracing::info!(subscription = ?card.subscription(), "first render");

    let streamed = card.subscription().cloned();
    if let Some(request) = streamed.filter(|_| config.preview.push_forecast) {
        let payload = VirtualWeatherStation::default().forecast(
            request.forecast_type,
            demo_epoch(),
            config.preview.forecast_points,
        );
        let delivered = host.push_forecast(&request.entity_id, &payload);
        tracing::info!(delivered, forecast_type = %request.forecast_type, "pushed forecast");
        if delivered > 0 && card.forecast_changed().await {
            view = card.update().unwrap_or(view);
        }
    }

    card.handle_click();
    card.on_detach();
    tracing::info!(
        events = host.events().len(),
        opened = host.opened().len(),
        unsubscribed = host.unsubscribed().len(),
        "preview finished"
    );

    Ok(render_html(&view)?)
}
