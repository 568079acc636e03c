//! Form schema derivation for the room card editor
//!
//! Turns the current configuration (plus a capability view over the live
//! entity states) into the ordered field-schema description the generic
//! form renderer displays. The renderer encodes none of the visibility
//! rules; this crate is their single home.

mod card;
mod entry;
mod node;
mod selector;

pub use card::build_card_schema;
pub use entry::build_state_entry_schema;
pub use node::{FieldContext, FieldDescriptor, SchemaNode};
pub use selector::{color_template_options, SelectOption, Selector};
