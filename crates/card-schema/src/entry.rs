//! State entry schema
//!
//! One expandable section per entry: type selector, icon pair, the shared
//! on/off grids (skipped for climate entities, which get one block per
//! reported HVAC mode instead), actions, the light-only color toggle, and
//! the type-specific trailing fields. The section auto-expands while the
//! entry is incomplete so new entries guide the user to finish them.

use card_config::{StateEntryConfig, StateEntryType};
use card_core::CapabilityResolver;

use crate::node::{FieldDescriptor, SchemaNode};
use crate::selector::{SelectOption, Selector};

/// Build the schema for a single state entry.
///
/// Pure in `(entry, snapshot)`; mode blocks follow the order the device
/// reports its modes in.
pub fn build_state_entry_schema(
    entry: &StateEntryConfig,
    caps: &CapabilityResolver<'_>,
) -> Vec<SchemaNode> {
    let climate = references_climate(entry, caps);

    let mut schema: Vec<SchemaNode> = vec![type_selector(), icon_grid()];

    // Climate entity entries get per-mode colors instead of the on/off grids
    if !(entry.is_entity() && climate) {
        schema.extend(on_off_grids());
    }

    schema.push(action_grid());

    if references_light(entry, caps) {
        schema.push(
            FieldDescriptor::new(
                "use_light_color",
                "Use Light Color as icon and background color",
                Selector::boolean(),
            )
            .into(),
        );
    }

    match entry.entry_type {
        Some(StateEntryType::Template) => {
            schema.push(
                FieldDescriptor::new("condition", "Template Condition", Selector::template())
                    .required()
                    .into(),
            );
        }
        Some(StateEntryType::Entity) => {
            schema.push(
                FieldDescriptor::new("entity", "Entity", Selector::entity())
                    .required()
                    .into(),
            );
            schema.extend(entity_state_schema(entry, caps, climate));
        }
        None => {}
    }

    let title = format!(
        "State: {}",
        entry
            .entry_type
            .map(StateEntryType::as_str)
            .unwrap_or("unknown")
    );

    vec![SchemaNode::expandable(title, entry.is_incomplete(), schema)]
}

fn type_selector() -> SchemaNode {
    FieldDescriptor::new(
        "type",
        "State Type",
        Selector::dropdown(vec![
            SelectOption::new("Entity", "entity"),
            SelectOption::new("Template", "template"),
        ]),
    )
    .into()
}

fn icon_grid() -> SchemaNode {
    SchemaNode::grid(vec![
        FieldDescriptor::new("icon", "Icon On", Selector::icon())
            .required()
            .with_icon_entity_context()
            .into(),
        FieldDescriptor::new("icon_off", "Icon Off", Selector::icon())
            .with_icon_entity_context()
            .into(),
    ])
}

fn on_off_grids() -> Vec<SchemaNode> {
    vec![
        SchemaNode::grid(vec![
            FieldDescriptor::new("color_on", "Color On", Selector::text()).into(),
            FieldDescriptor::new("color_off", "Color Off", Selector::text()).into(),
        ]),
        SchemaNode::grid(vec![
            FieldDescriptor::new("template_on", "Template On", Selector::color_template()).into(),
            FieldDescriptor::new("template_off", "Template Off", Selector::color_template())
                .into(),
        ]),
        SchemaNode::grid(vec![
            FieldDescriptor::new("background_color_on", "Background Color On", Selector::text())
                .into(),
            FieldDescriptor::new(
                "background_color_off",
                "Background Color Off",
                Selector::text(),
            )
            .into(),
        ]),
    ]
}

fn action_grid() -> SchemaNode {
    SchemaNode::grid(vec![
        FieldDescriptor::new("tap_action", "Tap Action", Selector::ui_action()).into(),
        FieldDescriptor::new("hold_action", "Hold Action", Selector::ui_action()).into(),
    ])
}

/// Trailing fields of an entity-typed entry: per-mode blocks for climate
/// devices that report modes, the plain on_state field otherwise.
fn entity_state_schema(
    entry: &StateEntryConfig,
    caps: &CapabilityResolver<'_>,
    climate: bool,
) -> Vec<SchemaNode> {
    if climate {
        let modes = entry
            .entity
            .as_deref()
            .map(|entity| caps.hvac_modes(entity))
            .unwrap_or_default();

        // A climate device with no reported modes degrades to on_state
        if !modes.is_empty() {
            return modes.iter().map(|mode| climate_mode_block(mode)).collect();
        }
    }

    vec![on_state_field()]
}

fn on_state_field() -> SchemaNode {
    FieldDescriptor::new("on_state", "On State", Selector::text())
        .required()
        .into()
}

/// One collapsed block of per-mode fields, names parameterized by the mode
fn climate_mode_block(mode: &str) -> SchemaNode {
    let label = mode_label(mode);

    SchemaNode::expandable(
        format!("{label} Mode"),
        false,
        vec![
            SchemaNode::grid(vec![
                FieldDescriptor::new(
                    format!("color_{mode}"),
                    format!("Color for {label}"),
                    Selector::text(),
                )
                .into(),
                FieldDescriptor::new(
                    format!("background_color_{mode}"),
                    format!("Background Color for {label}"),
                    Selector::text(),
                )
                .into(),
            ]),
            SchemaNode::grid(vec![FieldDescriptor::new(
                format!("template_{mode}"),
                format!("Template for {label}"),
                Selector::color_template(),
            )
            .into()]),
        ],
    )
}

/// Capitalize the first character and turn the first underscore into a
/// space ("heat_cool" -> "Heat cool")
fn mode_label(mode: &str) -> String {
    let mut chars = mode.chars();
    match chars.next() {
        Some(first) => format!(
            "{}{}",
            first.to_uppercase(),
            chars.as_str().replacen('_', " ", 1)
        ),
        None => String::new(),
    }
}

fn references_light(entry: &StateEntryConfig, caps: &CapabilityResolver<'_>) -> bool {
    entry.entity.as_deref().is_some_and(|e| caps.is_light(e))
}

fn references_climate(entry: &StateEntryConfig, caps: &CapabilityResolver<'_>) -> bool {
    entry.entity.as_deref().is_some_and(|e| caps.is_climate(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::field_names;
    use card_core::{EntityState, StateSnapshot};
    use serde_json::json;
    use std::collections::HashMap;

    fn climate_snapshot(modes: &[&str]) -> StateSnapshot {
        let mut attributes = HashMap::new();
        attributes.insert("hvac_modes".to_string(), json!(modes));
        [
            EntityState::new("climate.living_room", "heat", attributes),
            EntityState::bare("light.sofa", "on"),
        ]
        .into_iter()
        .collect()
    }

    fn entity_entry(entity: &str) -> StateEntryConfig {
        StateEntryConfig {
            entry_type: Some(StateEntryType::Entity),
            entity: Some(entity.to_string()),
            ..StateEntryConfig::default()
        }
    }

    #[test]
    fn test_mode_label() {
        assert_eq!(mode_label("heat"), "Heat");
        assert_eq!(mode_label("heat_cool"), "Heat cool");
        assert_eq!(mode_label(""), "");
    }

    #[test]
    fn test_climate_mode_generation() {
        let snapshot = climate_snapshot(&["heat", "cool", "off"]);
        let caps = CapabilityResolver::new(&snapshot);
        let schema = build_state_entry_schema(&entity_entry("climate.living_room"), &caps);

        let names = field_names(&schema);
        for mode in ["heat", "cool", "off"] {
            assert!(names.contains(&format!("color_{mode}")));
            assert!(names.contains(&format!("background_color_{mode}")));
            assert!(names.contains(&format!("template_{mode}")));
        }

        // The generic on/off grids and on_state are replaced by the blocks
        assert!(!names.contains(&"color_on".to_string()));
        assert!(!names.contains(&"color_off".to_string()));
        assert!(!names.contains(&"on_state".to_string()));

        // Blocks appear in reported order, collapsed
        let value = serde_json::to_value(&schema).unwrap();
        let titles: Vec<&str> = value[0]["schema"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|node| node["type"] == "expandable")
            .map(|node| node["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Heat Mode", "Cool Mode", "Off Mode"]);
    }

    #[test]
    fn test_climate_without_modes_falls_back_to_on_state() {
        let snapshot = climate_snapshot(&[]);
        let caps = CapabilityResolver::new(&snapshot);
        let schema = build_state_entry_schema(&entity_entry("climate.living_room"), &caps);

        let names = field_names(&schema);
        assert!(names.contains(&"on_state".to_string()));
        assert!(!names.contains(&"color_heat".to_string()));
        // The on/off grids stay suppressed for climate entries either way
        assert!(!names.contains(&"color_on".to_string()));
    }

    #[test]
    fn test_generic_entity_gets_on_state_and_grids() {
        let snapshot = StateSnapshot::new();
        let caps = CapabilityResolver::new(&snapshot);
        let schema = build_state_entry_schema(&entity_entry("switch.fan"), &caps);

        let names = field_names(&schema);
        assert!(names.contains(&"on_state".to_string()));
        assert!(names.contains(&"color_on".to_string()));
        assert!(names.contains(&"template_off".to_string()));
        assert!(!names.contains(&"use_light_color".to_string()));
    }

    #[test]
    fn test_light_entity_gets_use_light_color() {
        let snapshot = StateSnapshot::new();
        let caps = CapabilityResolver::new(&snapshot);

        let schema = build_state_entry_schema(&entity_entry("light.sofa"), &caps);
        assert!(field_names(&schema).contains(&"use_light_color".to_string()));
    }

    #[test]
    fn test_template_entry_tail() {
        let snapshot = StateSnapshot::new();
        let caps = CapabilityResolver::new(&snapshot);
        let schema = build_state_entry_schema(&StateEntryConfig::template(), &caps);

        let names = field_names(&schema);
        assert!(names.contains(&"condition".to_string()));
        assert!(!names.contains(&"entity".to_string()));
        assert!(!names.contains(&"on_state".to_string()));
    }

    #[test]
    fn test_auto_expand_tracks_incompleteness() {
        let snapshot = StateSnapshot::new();
        let caps = CapabilityResolver::new(&snapshot);

        // Fresh template entry: no condition yet, section starts open
        let fresh = build_state_entry_schema(&StateEntryConfig::template(), &caps);
        assert!(fresh[0].is_expanded());

        let mut done = StateEntryConfig::template();
        done.condition = Some("{{ true }}".to_string());
        let finished = build_state_entry_schema(&done, &caps);
        assert!(!finished[0].is_expanded());

        // Unset type: tolerated, collapsed, titled unknown
        let untyped = StateEntryConfig::default();
        let schema = build_state_entry_schema(&untyped, &caps);
        assert!(!schema[0].is_expanded());
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value[0]["title"], json!("State: unknown"));
    }
}
