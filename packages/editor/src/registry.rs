//! # Section Registry
//!
//! Maps a section `type` string to the component that renders and edits it.
//! Resolution is total: any type without a registered component resolves to
//! the generic JSON editor, so an unknown section never breaks a page.

use crate::components::generic::{GenericSection, JsonDraft};
use crate::components::{
    call_to_action::CallToActionView, feature_grid::FeatureGridView, hero::HeroView,
    rich_text::RichTextView, services::ServicesView, stat_cards::StatCardsView,
    testimonials::TestimonialsView, video_banner::VideoBannerView,
};
use crate::errors::{EditorError, FieldError};
use crate::fields::{ControlInput, FieldKind, FieldSpec};
use pagecraft_model::{ContentMap, RepeatableItems, Section, SectionContent, SectionKind};
use pagecraft_render::VNode;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// Whether a section is shown as page content or as its editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    Editing,
}

/// Per-render state handed to a component
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub mode: Mode,
    /// Unparsed generic editor text for this section, if any
    pub draft: Option<&'a JsonDraft>,
}

impl<'a> RenderContext<'a> {
    pub fn viewing() -> Self {
        Self {
            mode: Mode::Viewing,
            draft: None,
        }
    }

    pub fn editing(draft: Option<&'a JsonDraft>) -> Self {
        Self {
            mode: Mode::Editing,
            draft,
        }
    }
}

/// Change a component asks the composer to make to its section
#[derive(Debug, Clone, PartialEq)]
pub enum ContentUpdate {
    /// Shallow merge into the stored content
    Merge(ContentMap),
    /// Replace the stored content wholesale
    Replace(ContentMap),
}

/// Renders and edits one section type
pub trait SectionComponent: Send + Sync {
    fn section_type(&self) -> &str;

    fn label(&self) -> &str;

    /// Editable fields, in control order
    fn fields(&self) -> Vec<FieldSpec>;

    /// Content as the component sees it: stored values over defaults
    fn effective_content(&self, section: &Section) -> ContentMap;

    /// Read-only markup
    fn render_view(&self, section: &Section) -> VNode;

    fn render(&self, section: &Section, ctx: &RenderContext) -> VNode {
        match ctx.mode {
            Mode::Viewing => self.render_view(section),
            Mode::Editing => editor_frame(
                section,
                self.label(),
                self.render_view(section),
                self.render_controls(section, ctx),
            ),
        }
    }

    /// Controls pane bound to the effective content
    fn render_controls(&self, section: &Section, _ctx: &RenderContext) -> VNode {
        let content = self.effective_content(section);
        VNode::element("form")
            .with_class("pc-controls")
            .with_attr("data-section-id", section.id.as_str())
            .with_children(
                self.fields()
                    .iter()
                    .map(|spec| spec.render_control(content.get(spec.name), spec.name)),
            )
    }

    /// Validate a control input and turn it into a content update
    fn apply_input(&self, section: &Section, input: ControlInput) -> Result<ContentUpdate, EditorError> {
        apply_field_input(&self.fields(), &self.effective_content(section), input)
            .map_err(|err| match err {
                InputError::Field(err) => EditorError::Field(err),
                InputError::Unsupported(input) => EditorError::UnsupportedInput {
                    section_type: self.section_type().to_string(),
                    input,
                },
            })
    }
}

impl fmt::Debug for dyn SectionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionComponent")
            .field("section_type", &self.section_type())
            .finish()
    }
}

/// Two-pane editing layout: scaled live preview beside the controls
pub fn editor_frame(section: &Section, label: &str, preview: VNode, controls: VNode) -> VNode {
    VNode::element("div")
        .with_class("pc-editor")
        .with_attr("data-section-id", section.id.as_str())
        .with_attr("data-section-type", section.section_type.as_str())
        .with_child(
            VNode::element("div")
                .with_class("pc-editor__preview")
                .with_child(VNode::text_element("span", "Preview").with_class("pc-editor__caption"))
                .with_child(
                    VNode::element("div")
                        .with_class("pc-editor__canvas")
                        .with_style("transform", "scale(0.6)")
                        .with_style("transform-origin", "top left")
                        .with_child(preview),
                ),
        )
        .with_child(
            VNode::element("div")
                .with_class("pc-editor__controls")
                .with_child(VNode::text_element("h3", label))
                .with_child(controls),
        )
}

pub(crate) enum InputError {
    Field(FieldError),
    Unsupported(&'static str),
}

impl From<FieldError> for InputError {
    fn from(err: FieldError) -> Self {
        InputError::Field(err)
    }
}

impl From<pagecraft_model::ModelError> for InputError {
    fn from(err: pagecraft_model::ModelError) -> Self {
        InputError::Field(FieldError::Model(err))
    }
}

/// Field-driven input handling shared by every typed component.
///
/// `content` is the effective content; item edits start from it so that
/// default items become stored items on their first edit.
pub(crate) fn apply_field_input(
    fields: &[FieldSpec],
    content: &ContentMap,
    input: ControlInput,
) -> Result<ContentUpdate, InputError> {
    match input {
        ControlInput::SetField { field, value } => {
            let value = lookup(fields, &field)?.coerce(value)?;
            let mut patch = ContentMap::new();
            patch.insert(field, value);
            Ok(ContentUpdate::Merge(patch))
        }

        ControlInput::AddItem { field } => {
            let (spec, mut items) = repeatable(fields, content, &field)?;
            let template = match &spec.kind {
                FieldKind::Repeatable { template, .. } => template.clone(),
                _ => ContentMap::new(),
            };
            let id = items.push(template);
            tracing::debug!(field = %field, item_id = %id, "added item");
            Ok(ContentUpdate::Merge(items.into_patch()))
        }

        ControlInput::RemoveItem { field, index } => {
            let (_, mut items) = repeatable(fields, content, &field)?;
            items.remove(index)?;
            Ok(ContentUpdate::Merge(items.into_patch()))
        }

        ControlInput::SetItemField {
            field,
            index,
            key,
            value,
        } => {
            let (spec, mut items) = repeatable(fields, content, &field)?;
            let item_spec = spec
                .item_field(&key)
                .ok_or_else(|| FieldError::UnknownField(format!("{}.{}", field, key)))?;
            let value = item_spec.coerce(value)?;
            items.set_field(index, &key, value)?;
            Ok(ContentUpdate::Merge(items.into_patch()))
        }

        ControlInput::RawJson { .. } => Err(InputError::Unsupported("raw-json")),
    }
}

fn lookup<'a>(fields: &'a [FieldSpec], name: &str) -> Result<&'a FieldSpec, FieldError> {
    fields
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| FieldError::UnknownField(name.to_string()))
}

fn repeatable<'a>(
    fields: &'a [FieldSpec],
    content: &ContentMap,
    name: &str,
) -> Result<(&'a FieldSpec, RepeatableItems), InputError> {
    let spec = lookup(fields, name)?;
    if !spec.is_repeatable() {
        return Err(FieldError::NotRepeatable(name.to_string()).into());
    }
    Ok((spec, RepeatableItems::from_value(name, content.get(name))?))
}

/// Content type with a dedicated view
pub trait SectionView: Send + Sync + 'static {
    type Content: SectionContent;

    fn fields() -> Vec<FieldSpec>;

    fn view(section: &Section, content: &Self::Content) -> VNode;
}

/// Adapter from a [`SectionView`] to a [`SectionComponent`]
pub struct Typed<V>(PhantomData<fn() -> V>);

impl<V> Typed<V> {
    pub fn new() -> Self {
        Typed(PhantomData)
    }
}

impl<V> Default for Typed<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: SectionView> SectionComponent for Typed<V> {
    fn section_type(&self) -> &str {
        V::Content::KIND.as_str()
    }

    fn label(&self) -> &str {
        V::Content::KIND.label()
    }

    fn fields(&self) -> Vec<FieldSpec> {
        V::fields()
    }

    fn effective_content(&self, section: &Section) -> ContentMap {
        let mut content = section.decode::<V::Content>().to_content();
        for (key, value) in &section.content {
            match value {
                // Stored lists are edited as stored; defaults only fill absent keys
                Value::Array(_) => {
                    content.insert(key.clone(), value.clone());
                }
                // Unknown fields stay visible to callers that round-trip the map
                _ => {
                    content.entry(key.clone()).or_insert_with(|| value.clone());
                }
            }
        }
        content
    }

    fn render_view(&self, section: &Section) -> VNode {
        let content = section.decode::<V::Content>();
        V::view(section, &content)
    }
}

/// Type name → component lookup
pub struct Registry {
    components: BTreeMap<String, Box<dyn SectionComponent>>,
    fallback: GenericSection,
}

impl Registry {
    /// Registry with every built-in component
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for kind in SectionKind::ALL {
            registry.register(Self::builtin(kind));
        }
        registry
    }

    /// Registry where every type resolves to the generic editor
    pub fn empty() -> Self {
        Self {
            components: BTreeMap::new(),
            fallback: GenericSection,
        }
    }

    pub fn builtin(kind: SectionKind) -> Box<dyn SectionComponent> {
        match kind {
            SectionKind::Hero => Box::new(Typed::<HeroView>::new()),
            SectionKind::HomeServices => Box::new(Typed::<ServicesView>::new()),
            SectionKind::StatCards => Box::new(Typed::<StatCardsView>::new()),
            SectionKind::Testimonials => Box::new(Typed::<TestimonialsView>::new()),
            SectionKind::FeatureGrid => Box::new(Typed::<FeatureGridView>::new()),
            SectionKind::CallToAction => Box::new(Typed::<CallToActionView>::new()),
            SectionKind::RichText => Box::new(Typed::<RichTextView>::new()),
            SectionKind::VideoBanner => Box::new(Typed::<VideoBannerView>::new()),
        }
    }

    /// Add or replace the component for its section type
    pub fn register(&mut self, component: Box<dyn SectionComponent>) {
        self.components
            .insert(component.section_type().to_string(), component);
    }

    pub fn resolve(&self, section_type: &str) -> &dyn SectionComponent {
        match self.components.get(section_type) {
            Some(component) => component.as_ref(),
            None => {
                tracing::debug!(section_type, "no component registered, using generic editor");
                &self.fallback
            }
        }
    }

    pub fn is_known(&self, section_type: &str) -> bool {
        self.components.contains_key(section_type)
    }

    pub fn known_types(&self) -> Vec<&str> {
        self.components.keys().map(String::as_str).collect()
    }

    pub fn render(&self, section: &Section, ctx: &RenderContext) -> VNode {
        self.resolve(&section.section_type).render(section, ctx)
    }

    pub fn apply_input(&self, section: &Section, input: ControlInput) -> Result<ContentUpdate, EditorError> {
        self.resolve(&section.section_type).apply_input(section, input)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("components", &self.known_types())
            .finish()
    }
}

/// Convenience for tests and callers building patches by hand
pub fn patch(entries: impl IntoIterator<Item = (&'static str, Value)>) -> ContentMap {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hero() -> Section {
        Section::with_content("hero-1", "hero", ContentMap::new())
    }

    #[test]
    fn test_every_builtin_kind_resolves_to_itself() {
        let registry = Registry::new();
        for kind in SectionKind::ALL {
            assert_eq!(registry.resolve(kind.as_str()).section_type(), kind.as_str());
            assert!(registry.is_known(kind.as_str()));
        }
    }

    #[test]
    fn test_unknown_type_resolves_to_generic() {
        let registry = Registry::new();
        let component = registry.resolve("pricing-table");

        assert_eq!(component.section_type(), "generic");
        assert!(!registry.is_known("pricing-table"));
    }

    #[test]
    fn test_empty_registry_falls_back_for_everything() {
        let registry = Registry::empty();
        assert_eq!(registry.resolve("hero").section_type(), "generic");
        assert!(registry.known_types().is_empty());
    }

    #[test]
    fn test_set_field_produces_merge() {
        let registry = Registry::new();
        let update = registry
            .apply_input(&hero(), ControlInput::set("title", "Building"))
            .unwrap();

        assert_eq!(update, ContentUpdate::Merge(patch([("title", json!("Building"))])));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let registry = Registry::new();
        let err = registry
            .apply_input(&hero(), ControlInput::set("nope", "x"))
            .unwrap_err();

        assert_eq!(
            err,
            EditorError::Field(FieldError::UnknownField("nope".to_string()))
        );
    }

    #[test]
    fn test_raw_json_unsupported_on_typed_component() {
        let registry = Registry::new();
        let err = registry
            .apply_input(&hero(), ControlInput::RawJson { text: "{}".to_string() })
            .unwrap_err();

        assert!(matches!(err, EditorError::UnsupportedInput { input: "raw-json", .. }));
    }

    #[test]
    fn test_effective_content_keeps_unknown_fields() {
        let registry = Registry::new();
        let section = Section::with_content("hero-1", "hero", patch([("legacyBadge", json!("New"))]));
        let content = registry.resolve("hero").effective_content(&section);

        assert_eq!(content["legacyBadge"], json!("New"));
        assert_eq!(content["title"], json!("Integrating"));
    }

    #[test]
    fn test_editing_render_has_preview_and_controls() {
        let registry = Registry::new();
        let node = registry.render(&hero(), &RenderContext::editing(None));

        assert!(node.has_class("pc-editor"));
        assert!(node.find_class("pc-editor__preview").is_some());
        assert!(node.find_class("pc-controls").is_some());
        assert!(node.find_class("pc-hero").is_some());
    }

    #[test]
    fn test_viewing_render_has_no_controls() {
        let registry = Registry::new();
        let node = registry.render(&hero(), &RenderContext::viewing());

        assert!(node.find_class("pc-controls").is_none());
        assert!(node.find(&|n| n.tag() == Some("input")).is_none());
    }
}
