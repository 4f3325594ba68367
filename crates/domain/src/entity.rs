//! Entity snapshots — the read-only state objects handed over by the host.
//!
//! The host owns every snapshot and replaces it wholesale whenever the entity
//! changes. Snapshots are shared as `Arc<EntitySnapshot>` so that change
//! detection can compare references instead of contents.

use serde::{Deserialize, Serialize};

/// Entity id of the host's sun tracker.
pub const SUN_ENTITY_ID: &str = "sun.sun";

/// Domain prefix of weather entities (`weather.home`).
pub const WEATHER_DOMAIN: &str = "weather";

/// One entity as the host last reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub entity_id: String,
    pub state: String,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl EntitySnapshot {
    /// Create a snapshot without attributes.
    #[must_use]
    pub fn new(entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes: serde_json::Map::new(),
        }
    }

    /// Attach an attribute, replacing any previous value.
    #[must_use]
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up an attribute by key.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }

    /// Domain part of the entity id (`weather` for `weather.home`).
    #[must_use]
    pub fn domain(&self) -> &str {
        entity_domain(&self.entity_id)
    }
}

/// Domain part of an entity id; the whole id when it has no dot.
#[must_use]
pub fn entity_domain(entity_id: &str) -> &str {
    entity_id
        .split_once('.')
        .map_or(entity_id, |(domain, _)| domain)
}
