//! Selector descriptions understood by the form renderer
//!
//! Serializes to the renderer's wire format: an externally tagged object
//! like `{"text": {}}` or `{"entity": {"domain": "person"}}`.

use serde::Serialize;

/// One option of a dropdown selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The color templates a card or state entry can pick from
const COLOR_TEMPLATES: &[(&str, &str)] = &[
    ("Blue", "blue"),
    ("Light Blue", "lightblue"),
    ("Red", "red"),
    ("Green", "green"),
    ("Light Green", "lightgreen"),
    ("Yellow", "yellow"),
    ("Purple", "purple"),
    ("Orange", "orange"),
    ("Pink", "pink"),
    ("Grey", "grey"),
    ("Teal", "teal"),
    ("Indigo", "indigo"),
];

/// The color template options, in display order
pub fn color_template_options() -> Vec<SelectOption> {
    COLOR_TEMPLATES
        .iter()
        .map(|(label, value)| SelectOption::new(*label, *value))
        .collect()
}

/// Which control the renderer shows for a field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Selector {
    Text {},
    Icon {},
    Boolean {},
    Template {},
    Entity {
        #[serde(skip_serializing_if = "Option::is_none")]
        domain: Option<String>,
    },
    Select {
        multiple: bool,
        mode: String,
        options: Vec<SelectOption>,
    },
    #[serde(rename = "ui-action")]
    UiAction {},
}

impl Selector {
    pub fn text() -> Self {
        Self::Text {}
    }

    pub fn icon() -> Self {
        Self::Icon {}
    }

    pub fn boolean() -> Self {
        Self::Boolean {}
    }

    pub fn template() -> Self {
        Self::Template {}
    }

    pub fn ui_action() -> Self {
        Self::UiAction {}
    }

    /// Entity selector without a domain constraint
    pub fn entity() -> Self {
        Self::Entity { domain: None }
    }

    /// Entity selector constrained to one domain
    pub fn entity_in_domain(domain: impl Into<String>) -> Self {
        Self::Entity {
            domain: Some(domain.into()),
        }
    }

    /// Single-select dropdown over the given options
    pub fn dropdown(options: Vec<SelectOption>) -> Self {
        Self::Select {
            multiple: false,
            mode: "dropdown".to_string(),
            options,
        }
    }

    /// Dropdown over the color template options
    pub fn color_template() -> Self {
        Self::dropdown(color_template_options())
    }
}
