//! The editor session
//!
//! Owns the card's configuration for the lifetime of one editing surface.
//! The host supplies the raw configuration once (set_config) and a state
//! snapshot whenever it changes (set_states); the form renderer pulls
//! schemas on every render and pushes edits back through the value_changed
//! and list-mutation entry points. Mutations requested before both config
//! and snapshot are available are silent no-ops.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::debug;

use card_config::{
    append_state_entry, migrate, remove_state_entry, swap_state_entry, BackgroundType, CardConfig,
    ConfigResult, MoveDirection, StateEntryConfig,
};
use card_core::{CapabilityResolver, StateSnapshot};
use card_schema::{build_card_schema, build_state_entry_schema, SchemaNode};

use crate::notify::{ChangeNotifier, ConfigChangedEvent};

/// One editing session for one card
pub struct CardEditor {
    config: Option<CardConfig>,
    states: Option<Arc<StateSnapshot>>,
    notifier: ChangeNotifier,
}

impl CardEditor {
    /// Create an editor and the channel the host receives changes on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ConfigChangedEvent>) {
        let (notifier, rx) = ChangeNotifier::new();
        (
            Self {
                config: None,
                states: None,
                notifier,
            },
            rx,
        )
    }

    /// Supply the current entity state snapshot
    pub fn set_states(&mut self, states: Arc<StateSnapshot>) {
        self.states = Some(states);
    }

    /// Supply the raw (possibly legacy) configuration.
    ///
    /// The canonical shape is applied internally right away so the form
    /// renders correctly; when migration changed anything the outward
    /// notification is deferred so it cannot fire before the hosting
    /// element has finished attaching. The host calls [`flush_deferred`]
    /// once attached.
    ///
    /// [`flush_deferred`]: Self::flush_deferred
    pub fn set_config(&mut self, raw: Value) -> ConfigResult<()> {
        let (canonical, changed) = migrate(raw);
        let config = CardConfig::from_value(canonical)?;

        if changed {
            debug!("configuration migrated, deferring outward notification");
            self.notifier.defer(config.to_value());
        }

        self.config = Some(config);
        Ok(())
    }

    /// Deliver a pending migration notification (host calls after attach)
    pub fn flush_deferred(&self) {
        self.notifier.flush_deferred();
    }

    /// The current canonical configuration
    pub fn config(&self) -> Option<&CardConfig> {
        self.config.as_ref()
    }

    /// Apply a full replacement configuration from the card-level form.
    ///
    /// Switching the background type to `person` without a person selected
    /// auto-fills the first known person entity, so the emitted
    /// configuration is never momentarily invalid.
    pub fn value_changed(&mut self, new_config: Value) -> ConfigResult<()> {
        let (Some(current), Some(states)) = (self.config.as_ref(), self.states.as_ref()) else {
            return Ok(());
        };

        let mut next = CardConfig::from_value(new_config)?;

        if next.background_type == BackgroundType::Person
            && current.background_type != BackgroundType::Person
            && next
                .background_person_entity
                .as_deref()
                .map_or(true, str::is_empty)
        {
            let caps = CapabilityResolver::new(states);
            if let Some(person) = caps.first_person_entity() {
                debug!(person = %person, "auto-filling background person entity");
                next.background_person_entity = Some(person);
            }
        }

        // A stale legacy key can ride back in on the form value
        next.extra.shift_remove("background_settings");

        self.store_and_notify(next);
        Ok(())
    }

    /// Replace the state entry at `index` with the edited one.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    pub fn value_changed_entity(&mut self, index: usize, entry: StateEntryConfig) {
        if self.states.is_none() {
            return;
        }
        let Some(config) = self.config.as_ref() else {
            return;
        };

        let len = config.entities.len();
        assert!(index < len, "state entry index {index} out of range (len {len})");

        let mut next = config.clone();
        next.entities[index] = entry;
        self.store_and_notify(next);
    }

    /// Append a fresh template entry; a full list is a silent no-op
    pub fn add_state_entry(&mut self) {
        let Some(config) = self.config.as_ref() else {
            return;
        };
        let Some(next) = append_state_entry(config) else {
            return;
        };
        self.store_and_notify(next);
    }

    /// Remove the entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    pub fn delete_state_entry(&mut self, index: usize) {
        let Some(config) = self.config.as_ref() else {
            return;
        };
        let next = remove_state_entry(config, index);
        self.store_and_notify(next);
    }

    /// Move the entry at `index` one slot up or down.
    ///
    /// # Panics
    ///
    /// Panics when the move would leave the list.
    pub fn move_state_entry(&mut self, index: usize, direction: MoveDirection) {
        let Some(config) = self.config.as_ref() else {
            return;
        };
        let next = swap_state_entry(config, index, direction);
        self.store_and_notify(next);
    }

    /// The card-level schema for the current configuration.
    ///
    /// Recomputed on every call; the background switch must track
    /// `background_type` edits, so nothing here is cached.
    pub fn card_schema(&self) -> Vec<SchemaNode> {
        self.config.as_ref().map(build_card_schema).unwrap_or_default()
    }

    /// One schema per state entry, in list order.
    ///
    /// Works against an empty snapshot until the host supplies one;
    /// domain-prefix capability checks still apply then.
    pub fn state_entry_schemas(&self) -> Vec<Vec<SchemaNode>> {
        let Some(config) = self.config.as_ref() else {
            return Vec::new();
        };

        let empty = StateSnapshot::new();
        let states = self.states.as_deref().unwrap_or(&empty);
        let caps = CapabilityResolver::new(states);

        config
            .entities
            .iter()
            .map(|entry| build_state_entry_schema(entry, &caps))
            .collect()
    }

    fn store_and_notify(&mut self, next: CardConfig) {
        let value = next.to_value();
        self.config = Some(next);
        self.notifier.notify(value);
    }
}
