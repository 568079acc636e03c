//! Card catalog registration
//!
//! The host keeps one process-wide catalog of available cards; each card
//! announces itself exactly once at startup through an explicit
//! registration call. Registration is append-once: later registrations of
//! the same card type are ignored.

use std::sync::OnceLock;

use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;

/// The card type this crate implements
pub const ROOM_CARD_TYPE: &str = "room-card-minimalist";

/// One catalog entry describing a card to the host's card picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardDescriptor {
    #[serde(rename = "type")]
    pub card_type: String,
    pub name: String,
    pub preview: bool,
    pub description: String,
    #[serde(rename = "documentationURL")]
    pub documentation_url: String,
}

/// Registry of announced cards, keyed by card type
#[derive(Default)]
pub struct CardCatalog {
    cards: DashMap<String, CardDescriptor>,
}

impl CardCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card. Returns false (and changes nothing) when the card
    /// type is already registered.
    pub fn register(&self, descriptor: CardDescriptor) -> bool {
        match self.cards.entry(descriptor.card_type.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                debug!(card_type = %descriptor.card_type, "card already registered");
                false
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                debug!(card_type = %descriptor.card_type, "registering card");
                slot.insert(descriptor);
                true
            }
        }
    }

    /// Look up a registered card by type
    pub fn get(&self, card_type: &str) -> Option<CardDescriptor> {
        self.cards.get(card_type).map(|d| d.clone())
    }

    /// Number of registered cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// The process-wide catalog cards announce themselves into
pub fn global_catalog() -> &'static CardCatalog {
    static CATALOG: OnceLock<CardCatalog> = OnceLock::new();
    CATALOG.get_or_init(CardCatalog::new)
}

/// Announce the room card to the global catalog. Called once at host
/// startup; repeated calls are ignored.
pub fn register_room_card() -> bool {
    global_catalog().register(CardDescriptor {
        card_type: ROOM_CARD_TYPE.to_string(),
        name: "Room Card Minimalist".to_string(),
        preview: true,
        description: "Display the state of a room at a glance - in UI Lovelace Minimalist style"
            .to_string(),
        documentation_url: "https://github.com/unbekannt3/room-card-minimalist".to_string(),
    })
}
