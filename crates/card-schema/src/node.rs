//! Schema nodes: fields plus grid/expandable grouping markers
//!
//! A schema is an ordered sequence of nodes. Plain fields name a
//! configuration key and a selector; grids and expandables group nested
//! schemas for layout. The serialized form is the sole contract with the
//! form renderer.

use serde::Serialize;

use crate::selector::Selector;

/// Extra rendering context attached to a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_entity: Option<String>,
}

/// One editable field: configuration key, label, required flag, selector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    pub selector: Selector,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<FieldContext>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, selector: Selector) -> Self {
        Self {
            name: name.into(),
            label: Some(label.into()),
            required: None,
            selector,
            context: None,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    /// Let the icon picker preview against the entry's entity
    pub fn with_icon_entity_context(mut self) -> Self {
        self.context = Some(FieldContext {
            icon_entity: Some("entity".to_string()),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridNode {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'static str,
    schema: Vec<SchemaNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandableNode {
    #[serde(rename = "type")]
    kind: &'static str,
    expanded: bool,
    name: &'static str,
    title: String,
    schema: Vec<SchemaNode>,
}

/// One node of a form schema
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SchemaNode {
    Field(FieldDescriptor),
    Grid(GridNode),
    Expandable(ExpandableNode),
}

impl SchemaNode {
    /// A grid grouping marker laying out its children side by side
    pub fn grid(schema: Vec<SchemaNode>) -> Self {
        Self::Grid(GridNode {
            kind: "grid",
            name: "",
            schema,
        })
    }

    /// A collapsible section with a title
    pub fn expandable(title: impl Into<String>, expanded: bool, schema: Vec<SchemaNode>) -> Self {
        Self::Expandable(ExpandableNode {
            kind: "expandable",
            expanded,
            name: "",
            title: title.into(),
            schema,
        })
    }

    /// Whether this node is an expandable section that starts open
    pub fn is_expanded(&self) -> bool {
        matches!(self, Self::Expandable(node) if node.expanded)
    }
}

impl From<FieldDescriptor> for SchemaNode {
    fn from(field: FieldDescriptor) -> Self {
        Self::Field(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_wire_format() {
        let field = FieldDescriptor::new("name", "Name", Selector::text()).required();
        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            json!({
                "name": "name",
                "label": "Name",
                "required": true,
                "selector": {"text": {}},
            })
        );
    }

    #[test]
    fn test_icon_context_wire_format() {
        let field = FieldDescriptor::new("icon", "Icon On", Selector::icon())
            .with_icon_entity_context();
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["context"], json!({"icon_entity": "entity"}));
    }

    #[test]
    fn test_grid_wire_format() {
        let grid = SchemaNode::grid(vec![
            FieldDescriptor::new("color_on", "Color On", Selector::text()).into(),
        ]);
        let value = serde_json::to_value(&grid).unwrap();
        assert_eq!(value["type"], json!("grid"));
        assert_eq!(value["name"], json!(""));
        assert_eq!(value["schema"][0]["name"], json!("color_on"));
    }

    #[test]
    fn test_expandable_wire_format() {
        let node = SchemaNode::expandable("State: template", true, vec![]);
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], json!("expandable"));
        assert_eq!(value["expanded"], json!(true));
        assert_eq!(value["title"], json!("State: template"));
        assert!(node.is_expanded());
    }
}
