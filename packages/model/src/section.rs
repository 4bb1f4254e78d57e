//! # Sections
//!
//! A section is one block of a page: `{ id, type, content, hidden? }`.
//!
//! `type` is the discriminator and never changes after creation. `content`
//! is kept as the raw JSON object that was persisted so that fields written
//! by older (or newer) components survive a round trip through the editor.

use crate::content::{decode_lenient, SectionContent, SectionKind};
use crate::ids::unique_id;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Persisted content bag of a section
pub type ContentMap = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Unique within a page
    pub id: String,

    /// Discriminator resolved through the section registry
    #[serde(rename = "type")]
    pub section_type: String,

    #[serde(default)]
    pub content: ContentMap,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

impl Section {
    /// Create a section with explicit content
    pub fn with_content(
        id: impl Into<String>,
        section_type: impl Into<String>,
        content: ContentMap,
    ) -> Self {
        Self {
            id: id.into(),
            section_type: section_type.into(),
            content,
            hidden: false,
        }
    }

    /// Create a section of a known kind seeded with that kind's defaults.
    ///
    /// `taken` reports ids already used on the page.
    pub fn new(kind: SectionKind, taken: impl Fn(&str) -> bool) -> Self {
        let id = unique_id(Some(kind.as_str()), taken);
        Self::with_content(id, kind.as_str(), kind.default_content())
    }

    /// Known kind of this section, `None` for unregistered types
    pub fn kind(&self) -> Option<SectionKind> {
        SectionKind::parse(&self.section_type)
    }

    /// Decode the content into its typed form, falling back per field
    pub fn decode<T: SectionContent>(&self) -> T {
        decode_lenient(&self.content)
    }

    /// Shallow merge: every key of `patch` replaces the stored value, all
    /// other keys are left untouched.
    pub fn merge_content(&mut self, patch: ContentMap) {
        for (key, value) in patch {
            self.content.insert(key, value);
        }
    }

    /// Replace the whole content object
    pub fn replace_content(&mut self, content: ContentMap) {
        self.content = content;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> ContentMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_merge_is_shallow_and_keeps_untouched_fields() {
        let mut section = Section::with_content("s1", "hero", map(json!({ "a": 1, "b": 2 })));
        section.merge_content(map(json!({ "b": 3 })));

        assert_eq!(Value::Object(section.content), json!({ "a": 1, "b": 3 }));
    }

    #[test]
    fn test_merge_replaces_nested_values_wholesale() {
        let mut section = Section::with_content(
            "s1",
            "hero",
            map(json!({ "style": { "color": "red", "size": 2 } })),
        );
        section.merge_content(map(json!({ "style": { "color": "blue" } })));

        assert_eq!(section.content["style"], json!({ "color": "blue" }));
    }

    #[test]
    fn test_hidden_is_optional_on_the_wire() {
        let section: Section =
            serde_json::from_value(json!({ "id": "x", "type": "hero", "content": {} })).unwrap();
        assert!(!section.hidden);

        let encoded = serde_json::to_value(&section).unwrap();
        assert!(encoded.get("hidden").is_none());
        assert_eq!(encoded["type"], "hero");
    }

    #[test]
    fn test_new_section_is_seeded_with_defaults() {
        let section = Section::new(SectionKind::Hero, |_| false);

        assert_eq!(section.section_type, "hero");
        assert!(section.id.starts_with("hero-"));
        assert_eq!(section.content["title"], "Integrating");
    }

    #[test]
    fn test_unknown_type_has_no_kind() {
        let section = Section::with_content("x", "legacy-carousel", ContentMap::new());
        assert_eq!(section.kind(), None);
    }
}
