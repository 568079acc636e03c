//! Card-level schema
//!
//! A fixed prefix of display fields, the background type selector, then the
//! fields of whichever background type is active. Rebuilt on every render;
//! the background switch is never cached.

use card_config::{Background, CardConfig};

use crate::node::{FieldDescriptor, SchemaNode};
use crate::selector::{SelectOption, Selector};

/// Build the ordered schema for the card-level form
pub fn build_card_schema(config: &CardConfig) -> Vec<SchemaNode> {
    let mut schema: Vec<SchemaNode> = vec![
        FieldDescriptor::new("name", "Name", Selector::text())
            .required()
            .into(),
        FieldDescriptor::new("icon", "Icon", Selector::icon())
            .required()
            .with_icon_entity_context()
            .into(),
        FieldDescriptor::new("card_template", "Card Color Template", Selector::color_template())
            .into(),
        FieldDescriptor::new("tap_action", "Tap Action", Selector::ui_action()).into(),
        FieldDescriptor::new("hold_action", "Hold Action", Selector::ui_action()).into(),
        FieldDescriptor::new(
            "icon_color",
            "Icon Color - gets overwritten when using card color template",
            Selector::template(),
        )
        .into(),
        FieldDescriptor::new("secondary", "Secondary Info", Selector::template()).into(),
        FieldDescriptor::new("secondary_color", "Secondary Info Color", Selector::template())
            .into(),
        FieldDescriptor::new(
            "background_type",
            "Background Type",
            Selector::dropdown(background_type_options()),
        )
        .into(),
    ];

    schema.extend(background_schema(config));

    schema.push(
        FieldDescriptor::new(
            "entities_reverse_order",
            "Entities from bottom to top",
            Selector::boolean(),
        )
        .into(),
    );
    schema.push(
        FieldDescriptor::new(
            "use_template_color_for_title",
            "Use template color for Name",
            Selector::boolean(),
        )
        .into(),
    );
    schema.push(
        FieldDescriptor::new(
            "use_template_color_for_secondary",
            "Use template color for secondary info",
            Selector::boolean(),
        )
        .into(),
    );

    schema
}

fn background_type_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("No Background", "none"),
        SelectOption::new("Color Circle", "color"),
        SelectOption::new("Custom Image", "image"),
        SelectOption::new("Person Profile Picture", "person"),
    ]
}

/// The fields of the active background type.
///
/// Total over the Background view; unknown stored types already collapsed
/// to the color variant there.
fn background_schema(config: &CardConfig) -> Vec<SchemaNode> {
    match config.background() {
        Background::None => vec![],

        Background::Color { .. } => vec![FieldDescriptor::new(
            "background_circle_color",
            "Background Circle Color - empty for template color",
            Selector::template(),
        )
        .into()],

        Background::Image { .. } => vec![FieldDescriptor::new(
            "background_image",
            "File Path to Image (/local/...)",
            Selector::text(),
        )
        .into()],

        Background::Person { .. } => vec![FieldDescriptor::new(
            "background_person_entity",
            "Person Entity",
            Selector::entity_in_domain("person"),
        )
        .required()
        .into()],
    }
}
