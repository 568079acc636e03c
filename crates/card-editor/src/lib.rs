//! Editor session for the room card
//!
//! Wires the configuration migrator, schema builders, and list editing
//! into one session object the hosting element drives, and packages every
//! mutation into an outward "configuration changed" signal. Also hosts the
//! process-wide card catalog the card announces itself to.

mod catalog;
mod editor;
mod notify;

pub use catalog::{global_catalog, register_room_card, CardCatalog, CardDescriptor, ROOM_CARD_TYPE};
pub use editor::CardEditor;
pub use notify::{ChangeNotifier, ConfigChangedEvent, NotifyOrigin};
