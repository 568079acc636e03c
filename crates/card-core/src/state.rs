//! Entity state as seen by the editor

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domains::domain_of;

/// A snapshot of one entity's state
///
/// This is the read-only shape the host supplies for every entity the
/// editor may reference: the domain-qualified id, the current state value,
/// and the attributes bag (notably `hvac_modes` for climate entities).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    /// Domain-qualified entity id (e.g., "climate.living_room")
    pub entity_id: String,

    /// The state value (e.g., "on", "heat", "23.5")
    pub state: String,

    /// Additional attributes associated with the state
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl EntityState {
    /// Create a new entity state
    pub fn new(
        entity_id: impl Into<String>,
        state: impl Into<String>,
        attributes: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes,
        }
    }

    /// Create a state with no attributes
    pub fn bare(entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self::new(entity_id, state, HashMap::new())
    }

    /// Get the domain part of the entity id
    pub fn domain(&self) -> &str {
        domain_of(&self.entity_id)
    }

    /// Get an attribute value by key, deserialized into the requested type
    pub fn attribute<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.attributes
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_typed() {
        let mut attributes = HashMap::new();
        attributes.insert("hvac_modes".to_string(), json!(["heat", "cool", "off"]));
        let state = EntityState::new("climate.living_room", "heat", attributes);

        let modes: Vec<String> = state.attribute("hvac_modes").unwrap();
        assert_eq!(modes, vec!["heat", "cool", "off"]);
        assert_eq!(state.attribute::<Vec<String>>("missing"), None);
    }

    #[test]
    fn test_attribute_wrong_type() {
        let mut attributes = HashMap::new();
        attributes.insert("hvac_modes".to_string(), json!("not-a-list"));
        let state = EntityState::new("climate.living_room", "heat", attributes);

        assert_eq!(state.attribute::<Vec<String>>("hvac_modes"), None);
    }

    #[test]
    fn test_domain() {
        assert_eq!(EntityState::bare("person.alice", "home").domain(), "person");
    }
}
