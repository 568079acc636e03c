//! Bounded, copy-on-write editing of the state entry list
//!
//! All operations leave the input untouched and return a new CardConfig
//! with a new `entities` vector. Exceeding the size bound is a silent
//! no-op (the editing surface disables the control as well); handing in an
//! out-of-range index is a caller bug and panics.

use tracing::debug;

use crate::config::{CardConfig, StateEntryConfig};

/// Maximum number of state entries a card can hold
pub const MAX_STATE_ENTRIES: usize = 4;

/// Direction for moving a state entry within the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    /// Index delta for this direction (-1 or +1)
    pub fn delta(self) -> isize {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

/// Append a fresh template entry, unless the list is already full.
///
/// Returns `None` when the bound is reached; the caller treats that as a
/// no-op and must not notify.
pub fn append_state_entry(config: &CardConfig) -> Option<CardConfig> {
    if config.entities.len() >= MAX_STATE_ENTRIES {
        debug!(len = config.entities.len(), "state entry list full, append ignored");
        return None;
    }

    let mut next = config.clone();
    next.entities.push(StateEntryConfig::template());
    Some(next)
}

/// Remove the entry at `index`.
///
/// # Panics
///
/// Panics when `index` is out of range; the editing surface never offers
/// a remove control for a nonexistent row.
pub fn remove_state_entry(config: &CardConfig, index: usize) -> CardConfig {
    let len = config.entities.len();
    assert!(index < len, "state entry index {index} out of range (len {len})");

    let mut next = config.clone();
    next.entities.remove(index);
    next
}

/// Exchange the entries at `index` and its neighbor in `direction`.
///
/// # Panics
///
/// Panics when either index falls outside the list; the editing surface
/// disables the move controls at the boundaries.
pub fn swap_state_entry(config: &CardConfig, index: usize, direction: MoveDirection) -> CardConfig {
    let len = config.entities.len();
    assert!(index < len, "state entry index {index} out of range (len {len})");

    let target = match index.checked_add_signed(direction.delta()) {
        Some(target) if target < len => target,
        _ => panic!("cannot move state entry {index} {direction:?} (len {len})"),
    };

    let mut next = config.clone();
    next.entities.swap(index, target);
    next
}
