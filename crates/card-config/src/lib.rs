//! Canonical room card configuration
//!
//! This crate owns the card's configuration shape: the typed CardConfig and
//! StateEntryConfig structures, the one-shot migration from legacy
//! configuration shapes, and the bounded copy-on-write operations over the
//! state entry list.

mod config;
mod entities;
mod error;
mod migrate;

pub use config::{Background, BackgroundType, CardConfig, StateEntryConfig, StateEntryType};
pub use entities::{
    append_state_entry, remove_state_entry, swap_state_entry, MoveDirection, MAX_STATE_ENTRIES,
};
pub use error::{ConfigError, ConfigResult};
pub use migrate::migrate;
