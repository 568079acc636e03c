//! Core types for the room card editor
//!
//! This crate provides the read-only view of Home Assistant entity state
//! that the editor core works against: EntityState, StateSnapshot, and the
//! CapabilityResolver that answers domain/capability questions about
//! referenced entities.

mod capabilities;
mod domains;
mod snapshot;
mod state;

pub use capabilities::CapabilityResolver;
pub use domains::{domain_of, is_in_domain, ATTR_HVAC_MODES, CLIMATE_DOMAIN, LIGHT_DOMAIN, PERSON_DOMAIN};
pub use snapshot::StateSnapshot;
pub use state::EntityState;
