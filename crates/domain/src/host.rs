//! Host state — one tick of everything the host shares with the card.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entity::{EntitySnapshot, SUN_ENTITY_ID};
use crate::time::LabelFormat;
use crate::unit::UnitSystem;

fn default_language() -> String {
    "en".to_string()
}

/// Immutable snapshot of the host.
///
/// The host hands out a new `Arc<HostState>` on every tick. Entities that did
/// not change keep the *same* `Arc<EntitySnapshot>` across ticks; entities
/// that changed get a new one. Nothing is ever mutated in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostState {
    #[serde(default)]
    pub states: HashMap<String, Arc<EntitySnapshot>>,
    /// Language the user picked in the host UI.
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub unit_system: UnitSystem,
    /// IANA zone of the viewer (`Europe/Paris`); the machine's zone when unset.
    #[serde(default)]
    pub time_zone: Option<String>,
}

impl HostState {
    /// Look up an entity snapshot.
    #[must_use]
    pub fn get_state(&self, entity_id: &str) -> Option<&Arc<EntitySnapshot>> {
        self.states.get(entity_id)
    }

    /// The `sun.sun` snapshot, when the host tracks the sun.
    #[must_use]
    pub fn sun(&self) -> Option<&Arc<EntitySnapshot>> {
        self.get_state(SUN_ENTITY_ID)
    }

    /// Next tick with `snapshot` replacing the entity of the same id.
    ///
    /// All other entities keep their existing `Arc`.
    #[must_use]
    pub fn with_entity(&self, snapshot: EntitySnapshot) -> Self {
        let mut next = self.clone();
        next.states
            .insert(snapshot.entity_id.clone(), Arc::new(snapshot));
        next
    }

    /// Next tick without the given entity.
    #[must_use]
    pub fn without_entity(&self, entity_id: &str) -> Self {
        let mut next = self.clone();
        next.states.remove(entity_id);
        next
    }

    /// How timestamps are labelled for this viewer.
    #[must_use]
    pub fn label_format(&self) -> LabelFormat {
        LabelFormat::new(&self.language, self.time_zone.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_untouched_entities_by_reference() {
        let first = HostState::default()
            .with_entity(EntitySnapshot::new("weather.home", "sunny"))
            .with_entity(EntitySnapshot::new("sun.sun", "above_horizon"));
        let second = first.with_entity(EntitySnapshot::new("weather.home", "cloudy"));

        assert!(Arc::ptr_eq(
            first.sun().unwrap(),
            second.sun().unwrap()
        ));
        assert!(!Arc::ptr_eq(
            first.get_state("weather.home").unwrap(),
            second.get_state("weather.home").unwrap()
        ));
    }

    #[test]
    fn should_remove_entity() {
        let state = HostState::default().with_entity(EntitySnapshot::new("weather.home", "sunny"));
        assert!(state.without_entity("weather.home").get_state("weather.home").is_none());
    }

    #[test]
    fn should_deserialize_with_defaults() {
        let state: HostState = serde_json::from_str(
            r#"{"states": {"sun.sun": {"entity_id": "sun.sun", "state": "below_horizon"}}}"#,
        )
        .unwrap();
        assert_eq!(state.language, "en");
        assert_eq!(state.unit_system.length, "km");
        assert_eq!(state.sun().unwrap().state, "below_horizon");
        assert_eq!(state.time_zone, None);
    }

    #[test]
    fn should_label_in_viewer_language_and_zone() {
        let state: HostState =
            serde_json::from_str(r#"{"language": "fr", "time_zone": "Europe/Paris"}"#).unwrap();
        let ts = crate::time::parse("2024-05-01T22:00:00+00:00").unwrap();
        assert_eq!(state.label_format().clock_time(&ts), "00:00");
        assert!(state.label_format().short_weekday(&ts).starts_with("jeu"));
    }
}
