//! Fallback component for section types without a dedicated one.
//!
//! Viewing shows the raw content as pretty JSON. Editing is a single text
//! area holding the whole content object; an accepted edit replaces the
//! content wholesale, a malformed edit is kept as a draft with its parse
//! error and leaves the stored content untouched.

use crate::errors::{EditorError, FieldError};
use crate::fields::{ControlInput, FieldSpec};
use crate::registry::{editor_frame, ContentUpdate, Mode, RenderContext, SectionComponent};
use pagecraft_model::{ContentMap, RepeatableItems, Section};
use pagecraft_render::VNode;
use serde_json::Value;

pub const GENERIC_TYPE: &str = "generic";

/// Text typed into the generic editor that has not been accepted
#[derive(Debug, Clone, PartialEq)]
pub struct JsonDraft {
    pub text: String,
    pub error: Option<String>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GenericSection;

/// Content as indented JSON
pub fn pretty_content(content: &ContentMap) -> String {
    serde_json::to_string_pretty(content).unwrap_or_else(|_| "{}".to_string())
}

/// Parse generic editor text. Anything but a JSON object is rejected.
pub fn parse_content(text: &str) -> Result<ContentMap, EditorError> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(EditorError::MalformedContent(
            "content must be a JSON object".to_string(),
        )),
        Err(err) => Err(EditorError::MalformedContent(err.to_string())),
    }
}

impl SectionComponent for GenericSection {
    fn section_type(&self) -> &str {
        GENERIC_TYPE
    }

    fn label(&self) -> &str {
        "Custom Section"
    }

    fn fields(&self) -> Vec<FieldSpec> {
        Vec::new()
    }

    fn effective_content(&self, section: &Section) -> ContentMap {
        section.content.clone()
    }

    fn render_view(&self, section: &Section) -> VNode {
        VNode::element("section")
            .with_class("pc-section")
            .with_class("pc-generic")
            .with_attr("id", section.id.as_str())
            .with_attr("data-section-type", section.section_type.as_str())
            .with_child(
                VNode::text_element("h4", format!("Section: {}", section.section_type))
                    .with_class("pc-generic__type"),
            )
            .with_child(
                VNode::element("pre")
                    .with_child(VNode::text_element("code", pretty_content(&section.content))),
            )
    }

    fn render(&self, section: &Section, ctx: &RenderContext) -> VNode {
        match ctx.mode {
            Mode::Viewing => self.render_view(section),
            Mode::Editing => editor_frame(
                section,
                &format!("{} ({})", self.label(), section.section_type),
                self.render_view(section),
                self.render_controls(section, ctx),
            ),
        }
    }

    fn render_controls(&self, section: &Section, ctx: &RenderContext) -> VNode {
        let text = match ctx.draft {
            Some(draft) => draft.text.clone(),
            None => pretty_content(&section.content),
        };

        let mut form = VNode::element("form")
            .with_class("pc-controls")
            .with_attr("data-section-id", section.id.as_str())
            .with_child(
                VNode::element("label")
                    .with_class("pc-field")
                    .with_attr("data-field", "content")
                    .with_child(VNode::text_element("span", "Content (JSON)").with_class("pc-field__label"))
                    .with_child(
                        VNode::element("textarea")
                            .with_attr("name", "content")
                            .with_attr("rows", "16")
                            .with_attr("spellcheck", "false")
                            .with_child(VNode::text(text)),
                    ),
            );

        if let Some(error) = ctx.draft.and_then(|draft| draft.error.as_deref()) {
            form = form.with_child(
                VNode::text_element("p", error)
                    .with_class("pc-field__error")
                    .with_attr("role", "alert"),
            );
        }

        form
    }

    fn apply_input(&self, section: &Section, input: ControlInput) -> Result<ContentUpdate, EditorError> {
        match input {
            ControlInput::RawJson { text } => parse_content(&text).map(ContentUpdate::Replace),

            // Untyped fields: stored as given
            ControlInput::SetField { field, value } => {
                let mut patch = ContentMap::new();
                patch.insert(field, value);
                Ok(ContentUpdate::Merge(patch))
            }

            ControlInput::AddItem { field } => {
                let mut items = items_of(section, field)?;
                items.push(ContentMap::new());
                Ok(ContentUpdate::Merge(items.into_patch()))
            }

            ControlInput::RemoveItem { field, index } => {
                let mut items = items_of(section, field)?;
                items.remove(index).map_err(FieldError::from)?;
                Ok(ContentUpdate::Merge(items.into_patch()))
            }

            ControlInput::SetItemField {
                field,
                index,
                key,
                value,
            } => {
                let mut items = items_of(section, field)?;
                items.set_field(index, &key, value).map_err(FieldError::from)?;
                Ok(ContentUpdate::Merge(items.into_patch()))
            }
        }
    }
}

fn items_of(section: &Section, field: String) -> Result<RepeatableItems, FieldError> {
    let value = section.content.get(&field).cloned();
    Ok(RepeatableItems::from_value(field, value.as_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn custom() -> Section {
        let content = json!({ "title": "Pricing", "tiers": [{ "id": "t1", "name": "Basic" }] });
        match content {
            Value::Object(map) => Section::with_content("custom-1", "pricing-table", map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_view_shows_pretty_json() {
        let section = custom();
        let node = GenericSection.render_view(&section);

        let code = node.find(&|n| n.tag() == Some("code")).unwrap().text_content();
        assert_eq!(code, pretty_content(&section.content));
        assert!(code.contains("\"title\": \"Pricing\""));
    }

    #[test]
    fn test_valid_json_replaces_content() {
        let update = GenericSection
            .apply_input(&custom(), ControlInput::RawJson { text: r#"{"title":"Plans"}"#.to_string() })
            .unwrap();

        let mut expected = ContentMap::new();
        expected.insert("title".to_string(), json!("Plans"));
        assert_eq!(update, ContentUpdate::Replace(expected));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = GenericSection
            .apply_input(&custom(), ControlInput::RawJson { text: "{\"title\":".to_string() })
            .unwrap_err();
        assert!(matches!(err, EditorError::MalformedContent(_)));

        let err = parse_content("[1, 2]").unwrap_err();
        assert_eq!(
            err,
            EditorError::MalformedContent("content must be a JSON object".to_string())
        );
    }

    #[test]
    fn test_draft_text_and_error_rendered() {
        let draft = JsonDraft {
            text: "{ broken".to_string(),
            error: Some("expected value".to_string()),
        };
        let ctx = RenderContext::editing(Some(&draft));
        let node = GenericSection.render(&custom(), &ctx);

        let textarea = node.find(&|n| n.tag() == Some("textarea")).unwrap();
        assert_eq!(textarea.text_content(), "{ broken");
        assert_eq!(
            node.find_class("pc-field__error").unwrap().text_content(),
            "expected value"
        );
    }

    #[test]
    fn test_untyped_item_edits() {
        let update = GenericSection
            .apply_input(
                &custom(),
                ControlInput::SetItemField {
                    field: "tiers".to_string(),
                    index: 0,
                    key: "name".to_string(),
                    value: json!("Starter"),
                },
            )
            .unwrap();

        let ContentUpdate::Merge(patch) = update else {
            panic!("expected merge");
        };
        assert_eq!(patch["tiers"], json!([{ "id": "t1", "name": "Starter" }]));
    }
}
