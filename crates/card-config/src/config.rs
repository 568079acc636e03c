//! Typed card configuration
//!
//! CardConfig is the canonical (post-migration) shape of a room card's
//! settings. Key names are part of the stored-configuration contract and
//! must not change. Unknown keys round-trip through the flattened `extra`
//! map so switching background types or card versions is lossless.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigResult;

/// Which background-rendering mode is active.
///
/// Serialized as the plain strings "none", "color", "image", "person".
/// Any other string is preserved verbatim through `Other` so a stored
/// configuration never loses data; the schema builder treats unknown
/// values the same as `Color`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BackgroundType {
    None,
    Color,
    Image,
    Person,
    Other(String),
}

impl BackgroundType {
    /// The wire string for this background type
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Color => "color",
            Self::Image => "image",
            Self::Person => "person",
            Self::Other(s) => s,
        }
    }
}

impl Default for BackgroundType {
    fn default() -> Self {
        Self::Color
    }
}

impl From<String> for BackgroundType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "none" => Self::None,
            "color" => Self::Color,
            "image" => Self::Image,
            "person" => Self::Person,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for BackgroundType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<BackgroundType> for String {
    fn from(t: BackgroundType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for BackgroundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Borrowed view of the active background and its supporting field.
///
/// One variant per background type makes the schema dispatch a total match;
/// fields of inactive background types stay on CardConfig and are simply
/// not surfaced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background<'a> {
    None,
    Color { circle_color: Option<&'a str> },
    Image { path: Option<&'a str> },
    Person { entity: Option<&'a str> },
}

/// The kind of a state entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateEntryType {
    Template,
    Entity,
}

impl StateEntryType {
    /// The wire string for this entry type
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Entity => "entity",
        }
    }
}

/// One entry of the card's bounded state list.
///
/// Entries are tolerated in partially specified form (missing `type`,
/// missing `entity`); the schema builder surfaces incompleteness to the
/// user instead of rejecting it. Per-mode keys of climate entries
/// (`color_heat`, `template_cool`, ...) live in the flattened `extra` map
/// because their names depend on what the device reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateEntryConfig {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<StateEntryType>,

    /// Template variant: the condition expression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    /// Entity variant: the referenced entity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    /// Entity variant, non-climate: the state value considered "on"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_off: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_on: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_off: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_on: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_off: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color_on: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color_off: Option<String>,

    /// Opaque action descriptor, owned by the host's action runtime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tap_action: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold_action: Option<Value>,

    /// Light entities only: drive icon/background from the light's color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_light_color: Option<bool>,

    /// Per-mode keys and anything else not modeled above
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl StateEntryConfig {
    /// The fresh entry appended by the list editor
    pub fn template() -> Self {
        Self {
            entry_type: Some(StateEntryType::Template),
            ..Self::default()
        }
    }

    /// Check whether this entry is template-typed
    pub fn is_template(&self) -> bool {
        self.entry_type == Some(StateEntryType::Template)
    }

    /// Check whether this entry is entity-typed
    pub fn is_entity(&self) -> bool {
        self.entry_type == Some(StateEntryType::Entity)
    }

    /// An entry is incomplete when its required reference is still missing:
    /// a template entry without a condition, or an entity entry without an
    /// entity. Entries with no type yet are not considered incomplete.
    pub fn is_incomplete(&self) -> bool {
        match self.entry_type {
            Some(StateEntryType::Template) => self.condition.is_none(),
            Some(StateEntryType::Entity) => self.entity.is_none(),
            None => false,
        }
    }
}

/// The canonical root configuration of a room card.
///
/// `entities` is ordered; insertion order is render order (reversible via
/// `entities_reverse_order`). The list never exceeds
/// [`MAX_STATE_ENTRIES`](crate::MAX_STATE_ENTRIES).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Card-level color template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tap_action: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold_action: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,

    pub background_type: BackgroundType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_circle_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_person_entity: Option<String>,

    pub entities: Vec<StateEntryConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities_reverse_order: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_template_color_for_title: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_template_color_for_secondary: Option<bool>,

    /// Retained unknown keys, in original order
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl CardConfig {
    /// Parse a canonical (already migrated) JSON object
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize back to the JSON object handed to the host
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// View of the active background for total-match dispatch
    pub fn background(&self) -> Background<'_> {
        match &self.background_type {
            BackgroundType::None => Background::None,
            BackgroundType::Image => Background::Image {
                path: self.background_image.as_deref(),
            },
            BackgroundType::Person => Background::Person {
                entity: self.background_person_entity.as_deref(),
            },
            // Unknown types fall back to the color-circle schema
            BackgroundType::Color | BackgroundType::Other(_) => Background::Color {
                circle_color: self.background_circle_color.as_deref(),
            },
        }
    }
}
