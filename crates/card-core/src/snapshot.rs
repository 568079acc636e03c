//! Read-only snapshot of known entity states
//!
//! The host owns the live state store; the editor only ever sees an
//! immutable snapshot of it. The snapshot is built host-side (insert,
//! FromIterator) and handed to the editor, which never mutates it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domains::is_in_domain;
use crate::state::EntityState;

/// Mapping from entity id to its current state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSnapshot {
    states: HashMap<String, EntityState>,
}

impl StateSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity state, keyed by its entity id.
    ///
    /// Replaces any previous state for the same entity.
    pub fn insert(&mut self, state: EntityState) {
        self.states.insert(state.entity_id.clone(), state);
    }

    /// Get the state of an entity
    pub fn get(&self, entity_id: &str) -> Option<&EntityState> {
        self.states.get(entity_id)
    }

    /// Check whether the snapshot knows an entity
    pub fn contains(&self, entity_id: &str) -> bool {
        self.states.contains_key(entity_id)
    }

    /// Get all known entity ids (unordered)
    pub fn entity_ids(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    /// Get all entity ids belonging to a domain (unordered)
    pub fn domain_entity_ids<'a>(&'a self, domain: &'a str) -> impl Iterator<Item = &'a str> {
        self.entity_ids().filter(move |id| is_in_domain(id, domain))
    }

    /// Get the number of known entities
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check whether the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl FromIterator<EntityState> for StateSnapshot {
    fn from_iter<I: IntoIterator<Item = EntityState>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for state in iter {
            snapshot.insert(state);
        }
        snapshot
    }
}
