//! Capability queries against a state snapshot
//!
//! The schema builder needs to know a handful of things about a referenced
//! entity: whether it is a light, whether it is a climate device, and which
//! operating modes a climate device reports. All answers are pure functions
//! of the entity reference and the snapshot.

use crate::domains::{ATTR_HVAC_MODES, CLIMATE_DOMAIN, LIGHT_DOMAIN, PERSON_DOMAIN};
use crate::snapshot::StateSnapshot;

/// Answers domain/capability questions about entities.
///
/// Holds only a borrowed view of the snapshot; constructing one is free and
/// resolvers are rebuilt on every schema derivation.
#[derive(Debug, Clone, Copy)]
pub struct CapabilityResolver<'a> {
    states: &'a StateSnapshot,
}

impl<'a> CapabilityResolver<'a> {
    /// Create a resolver over a snapshot
    pub fn new(states: &'a StateSnapshot) -> Self {
        Self { states }
    }

    /// Check whether an entity reference is a light.
    ///
    /// The reference itself is checked first ("light." prefix); as a
    /// fallback the snapshot entry's own id is consulted, which covers
    /// aliased references the snapshot resolves to a light.
    pub fn is_light(&self, entity_ref: &str) -> bool {
        self.resolves_to_domain(entity_ref, LIGHT_DOMAIN)
    }

    /// Check whether an entity reference is a climate device.
    pub fn is_climate(&self, entity_ref: &str) -> bool {
        self.resolves_to_domain(entity_ref, CLIMATE_DOMAIN)
    }

    /// Get the HVAC modes a climate entity reports, in reported order.
    ///
    /// Empty when the reference is not a climate device or the snapshot has
    /// no `hvac_modes` attribute for it. The order is never re-sorted; it is
    /// the order the device advertises.
    pub fn hvac_modes(&self, entity_ref: &str) -> Vec<String> {
        if !self.is_climate(entity_ref) {
            return Vec::new();
        }

        self.states
            .get(entity_ref)
            .and_then(|state| state.attribute::<Vec<String>>(ATTR_HVAC_MODES))
            .unwrap_or_default()
    }

    /// Get the lexicographically first person entity id, if any exists.
    pub fn first_person_entity(&self) -> Option<String> {
        let mut persons: Vec<&str> = self.states.domain_entity_ids(PERSON_DOMAIN).collect();
        persons.sort_unstable();
        persons.first().map(|id| (*id).to_string())
    }

    fn resolves_to_domain(&self, entity_ref: &str, domain: &str) -> bool {
        let prefix = format!("{}.", domain);
        if entity_ref.starts_with(&prefix) {
            return true;
        }

        self.states
            .get(entity_ref)
            .is_some_and(|state| state.entity_id.starts_with(&prefix))
    }
}
