//! # weathercard-app
//!
//! Application layer — card use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** the host must implement (driven/outbound ports):
//!   - `ForecastConnection` — open forecast subscriptions
//!   - `ForecastUnsubscribe` — cancel one of them
//!   - `EventDispatcher` — notify the host of user interaction
//! - Define the **card lifecycle** (`CardLifecycle`) the host drives:
//!   attach, detach, render decision, post-render hook
//! - Keep at most one forecast subscription alive (`ForecastSubscription`)
//! - Decide whether a host tick needs a re-render (`change_detection`)
//! - Compose the view tree from host state (`view`)
//! - Describe the card to the host (`registration`)
//!
//! ## Dependency rule
//! Depends on `weathercard-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod card;
pub mod change_detection;
pub mod forecast_subscription;
pub mod lifecycle;
pub mod ports;
pub mod registration;
pub mod view;
