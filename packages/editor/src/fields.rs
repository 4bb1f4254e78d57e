//! # Field Editor Primitives
//!
//! Every editable section field is described by a [`FieldSpec`]. The spec
//! drives both halves of the editing contract:
//!
//! - **render**: one control per field in the controls pane
//! - **input**: validation/coercion of the value a control sends back
//!
//! Repeatable fields nest their own item specs and render add/remove
//! controls around each item.

use crate::errors::FieldError;
use pagecraft_model::ContentMap;
use pagecraft_render::VNode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input produced by one control of the controls pane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ControlInput {
    /// Replace one top-level field
    #[serde(rename_all = "camelCase")]
    SetField { field: String, value: Value },

    /// Append a new item to a repeatable field
    #[serde(rename_all = "camelCase")]
    AddItem { field: String },

    /// Remove the item at `index` of a repeatable field
    #[serde(rename_all = "camelCase")]
    RemoveItem { field: String, index: usize },

    /// Replace one field of the item at `index`
    #[serde(rename_all = "camelCase")]
    SetItemField {
        field: String,
        index: usize,
        key: String,
        value: Value,
    },

    /// Full content as free text (generic editor only)
    #[serde(rename_all = "camelCase")]
    RawJson { text: String },
}

impl ControlInput {
    pub fn set(field: impl Into<String>, value: impl Into<Value>) -> Self {
        ControlInput::SetField {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ControlInput::SetField { .. } => "set-field",
            ControlInput::AddItem { .. } => "add-item",
            ControlInput::RemoveItem { .. } => "remove-item",
            ControlInput::SetItemField { .. } => "set-item-field",
            ControlInput::RawJson { .. } => "raw-json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Textarea,
    Color,
    Range { min: f64, max: f64, step: f64 },
    Select { options: Vec<(&'static str, &'static str)> },
    Checkbox,
    Media(MediaKind),
    Repeatable {
        item_fields: Vec<FieldSpec>,
        template: ContentMap,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn textarea(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Textarea)
    }

    pub fn color(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Color)
    }

    pub fn range(name: &'static str, label: &'static str, min: f64, max: f64, step: f64) -> Self {
        Self::new(name, label, FieldKind::Range { min, max, step })
    }

    pub fn select(
        name: &'static str,
        label: &'static str,
        options: &[(&'static str, &'static str)],
    ) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Select {
                options: options.to_vec(),
            },
        )
    }

    pub fn checkbox(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    pub fn image(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Media(MediaKind::Image))
    }

    pub fn video(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Media(MediaKind::Video))
    }

    pub fn repeatable(
        name: &'static str,
        label: &'static str,
        item_fields: Vec<FieldSpec>,
        template: ContentMap,
    ) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Repeatable {
                item_fields,
                template,
            },
        )
    }

    pub fn is_repeatable(&self) -> bool {
        matches!(self.kind, FieldKind::Repeatable { .. })
    }

    /// Item field spec of a repeatable field
    pub fn item_field(&self, key: &str) -> Option<&FieldSpec> {
        match &self.kind {
            FieldKind::Repeatable { item_fields, .. } => {
                item_fields.iter().find(|spec| spec.name == key)
            }
            _ => None,
        }
    }

    /// Validate a control value and convert it to the stored form
    pub fn coerce(&self, value: Value) -> Result<Value, FieldError> {
        match &self.kind {
            FieldKind::Text | FieldKind::Textarea | FieldKind::Media(_) => {
                if value.is_string() {
                    Ok(value)
                } else {
                    Err(self.wrong_type("a string"))
                }
            }

            FieldKind::Color => {
                let color = value
                    .as_str()
                    .ok_or_else(|| self.wrong_type("a colour string"))?;
                if !is_hex_color(color) {
                    return Err(FieldError::InvalidColor {
                        field: self.name.to_string(),
                        value: color.to_string(),
                    });
                }
                Ok(value)
            }

            FieldKind::Range { min, max, .. } => {
                let number = match &value {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                }
                .filter(|n| n.is_finite())
                .ok_or_else(|| self.wrong_type("a number"))?;

                Ok(number_value(number.clamp(*min, *max)))
            }

            FieldKind::Select { options } => {
                let choice = value
                    .as_str()
                    .ok_or_else(|| self.wrong_type("one of the options"))?;
                if !options.iter().any(|(option, _)| *option == choice) {
                    return Err(FieldError::InvalidOption {
                        field: self.name.to_string(),
                        value: choice.to_string(),
                    });
                }
                Ok(value)
            }

            FieldKind::Checkbox => match &value {
                Value::Bool(on) => Ok(Value::Bool(*on)),
                Value::String(s) if s == "true" || s == "on" => Ok(Value::Bool(true)),
                Value::String(s) if s == "false" || s == "off" || s.is_empty() => {
                    Ok(Value::Bool(false))
                }
                _ => Err(self.wrong_type("a boolean")),
            },

            FieldKind::Repeatable { .. } => {
                let valid = value
                    .as_array()
                    .map(|items| items.iter().all(Value::is_object))
                    .unwrap_or(false);
                if valid {
                    Ok(value)
                } else {
                    Err(self.wrong_type("a list of objects"))
                }
            }
        }
    }

    fn wrong_type(&self, expected: &'static str) -> FieldError {
        FieldError::WrongType {
            field: self.name.to_string(),
            expected,
        }
    }

    /// Control bound to this field. `path` is the form name of the control
    /// (`title`, `services[2].title`, ...).
    pub fn render_control(&self, value: Option<&Value>, path: &str) -> VNode {
        let control = match &self.kind {
            FieldKind::Text => VNode::element("input")
                .with_attr("type", "text")
                .with_attr("name", path)
                .with_attr("value", display_value(value)),

            FieldKind::Textarea => VNode::element("textarea")
                .with_attr("name", path)
                .with_attr("rows", "4")
                .with_child(VNode::text(display_value(value))),

            FieldKind::Color => VNode::element("input")
                .with_attr("type", "color")
                .with_attr("name", path)
                .with_attr("value", display_value(value)),

            FieldKind::Range { min, max, step } => VNode::element("span")
                .with_class("pc-range")
                .with_child(
                    VNode::element("input")
                        .with_attr("type", "range")
                        .with_attr("name", path)
                        .with_attr("min", min.to_string())
                        .with_attr("max", max.to_string())
                        .with_attr("step", step.to_string())
                        .with_attr("value", display_value(value)),
                )
                .with_child(VNode::text_element("output", display_value(value))),

            FieldKind::Select { options } => {
                let current = display_value(value);
                VNode::element("select")
                    .with_attr("name", path)
                    .with_children(options.iter().map(|(option, label)| {
                        VNode::text_element("option", *label)
                            .with_attr("value", *option)
                            .with_flag("selected", *option == current)
                    }))
            }

            FieldKind::Checkbox => VNode::element("input")
                .with_attr("type", "checkbox")
                .with_attr("name", path)
                .with_flag("checked", value.and_then(Value::as_bool).unwrap_or(false)),

            FieldKind::Media(kind) => render_media_control(*kind, value, path),

            FieldKind::Repeatable { item_fields, .. } => {
                return self.render_repeatable(item_fields, value, path);
            }
        };

        VNode::element("label")
            .with_class("pc-field")
            .with_attr("data-field", path)
            .with_child(VNode::text_element("span", self.label).with_class("pc-field__label"))
            .with_child(control)
    }

    fn render_repeatable(&self, item_fields: &[FieldSpec], value: Option<&Value>, path: &str) -> VNode {
        let items = value.and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[]);

        let rendered = items.iter().enumerate().map(|(index, item)| {
            let item_id = match item.get("id") {
                Some(Value::String(id)) => id.clone(),
                Some(Value::Number(id)) => id.to_string(),
                _ => String::new(),
            };
            VNode::element("div")
                .with_class("pc-repeatable__item")
                .with_attr("data-item-id", item_id)
                .with_attr("data-index", index.to_string())
                .with_children(item_fields.iter().map(|spec| {
                    let item_path = format!("{}[{}].{}", path, index, spec.name);
                    spec.render_control(item.get(spec.name), &item_path)
                }))
                .with_child(
                    VNode::text_element("button", "Remove")
                        .with_attr("type", "button")
                        .with_attr("data-action", "remove-item")
                        .with_attr("data-field", path)
                        .with_attr("data-index", index.to_string()),
                )
        });

        VNode::element("fieldset")
            .with_class("pc-repeatable")
            .with_attr("data-field", path)
            .with_child(VNode::text_element("legend", self.label))
            .with_children(rendered)
            .with_child(
                VNode::text_element("button", format!("Add {}", self.label))
                    .with_attr("type", "button")
                    .with_attr("data-action", "add-item")
                    .with_attr("data-field", path),
            )
    }
}

fn render_media_control(kind: MediaKind, value: Option<&Value>, path: &str) -> VNode {
    let url = display_value(value);
    let preview = if url.is_empty() {
        VNode::text_element("span", "No media selected").with_class("pc-media__empty")
    } else {
        let element = match kind {
            MediaKind::Image => VNode::element("img")
                .with_attr("src", url.clone())
                .with_attr("alt", ""),
            MediaKind::Video => VNode::element("video")
                .with_attr("src", url.clone())
                .with_flag("muted", true),
        };
        element.with_class("pc-media__preview")
    };

    let accept = match kind {
        MediaKind::Image => "image/*",
        MediaKind::Video => "video/*",
    };

    VNode::element("div")
        .with_class("pc-media")
        .with_child(preview)
        .with_child(
            VNode::element("input")
                .with_attr("type", "url")
                .with_attr("name", path)
                .with_attr("value", url),
        )
        .with_child(
            VNode::text_element("button", "Upload")
                .with_attr("type", "button")
                .with_attr("data-action", "upload")
                .with_attr("data-accept", accept)
                .with_attr("data-field", path),
        )
}

/// Text shown in a control for a stored value
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn number_value(number: f64) -> Value {
    if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        Value::from(number as i64)
    } else {
        Value::from(number)
    }
}

fn is_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_range_clamps_and_keeps_integers() {
        let spec = FieldSpec::range("columns", "Columns", 2.0, 6.0, 1.0);

        assert_eq!(spec.coerce(json!(9)).unwrap(), json!(6));
        assert_eq!(spec.coerce(json!("3")).unwrap(), json!(3));
        assert_eq!(spec.coerce(json!(0.5)).unwrap(), json!(2));
        assert!(spec.coerce(json!("lots")).is_err());
    }

    #[test]
    fn test_range_fractional_values() {
        let spec = FieldSpec::range("overlayOpacity", "Opacity", 0.0, 1.0, 0.05);
        assert_eq!(spec.coerce(json!(0.35)).unwrap(), json!(0.35));
    }

    #[test]
    fn test_color_validation() {
        let spec = FieldSpec::color("textColor", "Text colour");

        assert!(spec.coerce(json!("#fff")).is_ok());
        assert!(spec.coerce(json!("#A0B1C2")).is_ok());
        assert_eq!(
            spec.coerce(json!("red")).unwrap_err(),
            FieldError::InvalidColor {
                field: "textColor".to_string(),
                value: "red".to_string()
            }
        );
    }

    #[test]
    fn test_select_rejects_unknown_option() {
        let spec = FieldSpec::select("alignment", "Alignment", &[("left", "Left"), ("center", "Center")]);

        assert!(spec.coerce(json!("left")).is_ok());
        assert!(matches!(
            spec.coerce(json!("diagonal")),
            Err(FieldError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_checkbox_accepts_form_strings() {
        let spec = FieldSpec::checkbox("autoplay", "Autoplay");

        assert_eq!(spec.coerce(json!("on")).unwrap(), json!(true));
        assert_eq!(spec.coerce(json!(false)).unwrap(), json!(false));
        assert!(spec.coerce(json!(1)).is_err());
    }

    #[test]
    fn test_text_requires_string() {
        let spec = FieldSpec::text("title", "Title");
        assert!(matches!(
            spec.coerce(json!(42)),
            Err(FieldError::WrongType { expected: "a string", .. })
        ));
    }

    #[test]
    fn test_render_text_control() {
        let spec = FieldSpec::text("title", "Title");
        let node = spec.render_control(Some(&json!("Hello")), "title");

        assert!(node.has_class("pc-field"));
        let input = node.find(&|n| n.tag() == Some("input")).unwrap();
        assert_eq!(input.attr("name"), Some("title"));
        assert_eq!(input.attr("value"), Some("Hello"));
    }

    #[test]
    fn test_render_select_marks_current_option() {
        let spec = FieldSpec::select("layout", "Layout", &[("grid", "Grid"), ("list", "List")]);
        let node = spec.render_control(Some(&json!("list")), "layout");

        let selected = node.find_all(&|n| n.attr("selected").is_some());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].attr("value"), Some("list"));
    }

    #[test]
    fn test_render_repeatable_controls() {
        let spec = FieldSpec::repeatable(
            "stats",
            "Stats",
            vec![FieldSpec::text("label", "Label")],
            ContentMap::new(),
        );
        let value = json!([{ "id": "a", "label": "One" }, { "id": "b", "label": "Two" }]);
        let node = spec.render_control(Some(&value), "stats");

        let items = node.find_all(&|n| n.has_class("pc-repeatable__item"));
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].attr("data-item-id"), Some("b"));

        let nested = node.find(&|n| n.attr("name") == Some("stats[1].label")).unwrap();
        assert_eq!(nested.attr("value"), Some("Two"));

        assert!(node.find(&|n| n.attr("data-action") == Some("add-item")).is_some());
        assert_eq!(node.find_all(&|n| n.attr("data-action") == Some("remove-item")).len(), 2);
    }

    #[test]
    fn test_control_input_wire_format() {
        let input: ControlInput = serde_json::from_value(json!({
            "kind": "setItemField",
            "field": "services",
            "index": 1,
            "key": "title",
            "value": "Roads"
        }))
        .unwrap();

        assert_eq!(
            input,
            ControlInput::SetItemField {
                field: "services".to_string(),
                index: 1,
                key: "title".to_string(),
                value: json!("Roads"),
            }
        );
    }
}
