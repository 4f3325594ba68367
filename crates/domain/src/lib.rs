//! # weathercard-domain
//!
//! Pure domain model for the weather card.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define the **card configuration** and its invariants
//! - Define **entity snapshots** handed over by the host (weather, sun)
//! - Define **forecast payloads** and forecast points
//! - Provide the pure resolvers the view is built from:
//!   - [`unit`] — display unit for a measurement
//!   - [`icon`] — condition code to icon URL
//!   - [`wind`] — bearing to 16-point compass label
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod config;
pub mod entity;
pub mod forecast;
pub mod host;
pub mod icon;
pub mod sun;
pub mod unit;
pub mod weather;
pub mod wind;
