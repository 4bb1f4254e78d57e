//! # Page Composer
//!
//! Owns the working copy of one page: its ordered sections, the version
//! history returned by the store, and generic-editor drafts.
//!
//! ```text
//!   control input ──► registry ──► ContentUpdate ──► sections (dirty)
//!                                                         │
//!   save / revert ─────────► LayoutStore ──► canonical state replaces
//!                                             sections + versions
//! ```
//!
//! Edits apply immediately and stay local until `save`. A failed save or
//! revert never touches the working copy.

use crate::auth::Credentials;
use crate::components::generic::JsonDraft;
use crate::errors::{ComposerError, EditorError};
use crate::fields::ControlInput;
use crate::mutations::PageMutation;
use crate::registry::{ContentUpdate, Mode, Registry, RenderContext};
use pagecraft_model::{
    CacheInvalidation, ContentMap, Layout, LayoutState, LayoutStore, MediaUploader,
    SaveVersionRequest, Section, Version,
};
use pagecraft_render::VNode;
use std::collections::HashMap;
use tokio::sync::broadcast;

const INVALIDATION_CAPACITY: usize = 16;

/// Result of a successful save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Published,
    Drafted,
}

/// Where an uploaded media URL is stored
#[derive(Debug, Clone, PartialEq)]
pub enum MediaTarget {
    Field(String),
    ItemField {
        field: String,
        index: usize,
        key: String,
    },
}

pub struct PageComposer<S> {
    layout_id: String,
    slug: String,
    name: String,
    sections: Vec<Section>,
    versions: Vec<Version>,
    drafts: HashMap<String, JsonDraft>,
    dirty: bool,
    is_saving: bool,
    store: S,
    credentials: Credentials,
    registry: Registry,
    invalidations: broadcast::Sender<CacheInvalidation>,
}

impl<S: LayoutStore> PageComposer<S> {
    /// Working copy seeded from the newest draft, or the published sections
    pub fn new(layout: &Layout, store: S, credentials: Credentials) -> Self {
        let (invalidations, _) = broadcast::channel(INVALIDATION_CAPACITY);
        Self {
            layout_id: layout.id.clone(),
            slug: layout.slug.clone(),
            name: layout.name.clone(),
            sections: layout.working_sections(),
            versions: layout.versions.clone(),
            drafts: HashMap::new(),
            dirty: false,
            is_saving: false,
            store,
            credentials,
            registry: Registry::new(),
            invalidations,
        }
    }

    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Publish invalidations on an existing channel
    pub fn with_invalidations(mut self, sender: broadcast::Sender<CacheInvalidation>) -> Self {
        self.invalidations = sender;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheInvalidation> {
        self.invalidations.subscribe()
    }

    pub fn layout_id(&self) -> &str {
        &self.layout_id
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn draft(&self, section_id: &str) -> Option<&JsonDraft> {
        self.drafts.get(section_id)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn credentials_mut(&mut self) -> &mut Credentials {
        &mut self.credentials
    }

    /// Shallow-merge `patch` into a section's content. Unknown ids are
    /// ignored; returns whether a section was updated.
    pub fn update_section(&mut self, id: &str, patch: ContentMap) -> bool {
        match self.sections.iter_mut().find(|section| section.id == id) {
            Some(section) => {
                section.merge_content(patch);
                self.dirty = true;
                true
            }
            None => {
                tracing::debug!(section_id = id, "update for unknown section ignored");
                false
            }
        }
    }

    /// Route a control input through the section's component
    pub fn apply_input(&mut self, id: &str, input: ControlInput) -> Result<(), ComposerError> {
        let section = self
            .section(id)
            .ok_or_else(|| ComposerError::SectionNotFound(id.to_string()))?;

        let raw_text = match &input {
            ControlInput::RawJson { text } => Some(text.clone()),
            _ => None,
        };

        match self.registry.apply_input(section, input) {
            Ok(update) => {
                self.drafts.remove(id);
                self.apply_update(id, update);
                Ok(())
            }
            Err(EditorError::MalformedContent(message)) => {
                if let Some(text) = raw_text {
                    self.drafts.insert(
                        id.to_string(),
                        JsonDraft {
                            text,
                            error: Some(message.clone()),
                        },
                    );
                }
                Err(EditorError::MalformedContent(message).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn apply_update(&mut self, id: &str, update: ContentUpdate) {
        match update {
            ContentUpdate::Merge(patch) => {
                self.update_section(id, patch);
            }
            ContentUpdate::Replace(content) => {
                if let Some(section) = self.sections.iter_mut().find(|s| s.id == id) {
                    section.replace_content(content);
                    self.dirty = true;
                }
            }
        }
    }

    /// Insert, remove, move or hide a section
    pub fn apply_mutation(&mut self, mutation: PageMutation) -> Result<String, ComposerError> {
        let id = mutation.apply(&mut self.sections)?;
        if let PageMutation::RemoveSection { section_id } = &mutation {
            self.drafts.remove(section_id);
        }
        self.dirty = true;
        tracing::debug!(?mutation, "applied page mutation");
        Ok(id)
    }

    fn token(&self) -> Result<String, ComposerError> {
        self.credentials
            .resolve()
            .map(str::to_string)
            .ok_or(ComposerError::NotLoggedIn)
    }

    /// Persist the working copy as a new version
    pub async fn save(
        &mut self,
        is_draft: bool,
        notes: Option<String>,
    ) -> Result<SaveOutcome, ComposerError> {
        if self.is_saving {
            return Err(ComposerError::SaveInProgress);
        }
        let token = self.token()?;

        let request = SaveVersionRequest {
            sections: self.sections.clone(),
            is_draft,
            notes,
        };

        let result = {
            let _saving = SavingFlag::raise(&mut self.is_saving);
            self.store
                .save_version(&self.layout_id, &request, &token)
                .await
        };

        match result {
            Ok(state) => {
                self.replace_state(state);
                let outcome = if is_draft {
                    SaveOutcome::Drafted
                } else {
                    self.broadcast_invalidation();
                    SaveOutcome::Published
                };
                tracing::info!(layout_id = %self.layout_id, ?outcome, "layout saved");
                Ok(outcome)
            }
            Err(err) => {
                tracing::error!(layout_id = %self.layout_id, error = %err, "failed to save layout");
                Err(err.into())
            }
        }
    }

    /// Republish a stored version
    pub async fn revert(&mut self, version_id: &str) -> Result<(), ComposerError> {
        let token = self.token()?;

        match self.store.revert(&self.layout_id, version_id, &token).await {
            Ok(state) => {
                self.replace_state(state);
                self.broadcast_invalidation();
                tracing::info!(layout_id = %self.layout_id, version_id, "layout reverted");
                Ok(())
            }
            Err(err) => {
                tracing::error!(
                    layout_id = %self.layout_id,
                    version_id,
                    error = %err,
                    "failed to revert layout"
                );
                Err(err.into())
            }
        }
    }

    /// Upload a file and store its URL in a media field
    pub async fn upload_media<U: MediaUploader>(
        &mut self,
        uploader: &U,
        section_id: &str,
        target: MediaTarget,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ComposerError> {
        if self.section(section_id).is_none() {
            return Err(ComposerError::SectionNotFound(section_id.to_string()));
        }
        let token = self.token()?;

        let url = uploader.upload(file_name, bytes, &token).await.map_err(|err| {
            tracing::error!(file_name, error = %err, "media upload failed");
            err
        })?;

        let input = match target {
            MediaTarget::Field(field) => ControlInput::SetField {
                field,
                value: url.clone().into(),
            },
            MediaTarget::ItemField { field, index, key } => ControlInput::SetItemField {
                field,
                index,
                key,
                value: url.clone().into(),
            },
        };
        self.apply_input(section_id, input)?;
        Ok(url)
    }

    fn replace_state(&mut self, state: LayoutState) {
        self.sections = state.sections;
        self.versions = state.versions;
        self.drafts.clear();
        self.dirty = false;
    }

    fn broadcast_invalidation(&self) {
        let signal = CacheInvalidation {
            layout_id: self.layout_id.clone(),
            slug: self.slug.clone(),
        };
        // No subscribers is fine
        let _ = self.invalidations.send(signal);
    }

    /// Render the whole page in `mode`
    pub fn render_page(&self, mode: Mode) -> VNode {
        let page = VNode::element("main")
            .with_class("pc-page")
            .with_attr("data-layout-id", self.layout_id.as_str());

        match mode {
            Mode::Viewing => page.with_children(
                self.sections
                    .iter()
                    .filter(|section| !section.hidden)
                    .map(|section| self.registry.render(section, &RenderContext::viewing())),
            ),
            Mode::Editing => page
                .with_class("pc-page--editing")
                .with_children(
                    self.sections
                        .iter()
                        .enumerate()
                        .map(|(index, section)| self.section_frame(index, section)),
                )
                .with_child(self.insert_menu()),
        }
    }

    fn section_frame(&self, index: usize, section: &Section) -> VNode {
        let component = self.registry.resolve(&section.section_type);
        let ctx = RenderContext::editing(self.draft(&section.id));

        let action = |action: &str, label: &str| {
            VNode::text_element("button", label)
                .with_attr("type", "button")
                .with_attr("data-action", action)
                .with_attr("data-section-id", section.id.as_str())
        };

        let bar = VNode::element("div")
            .with_class("pc-section-frame__bar")
            .with_child(VNode::text_element("span", component.label()))
            .with_child(action("move-up", "Move up").with_flag("disabled", index == 0))
            .with_child(
                action("move-down", "Move down")
                    .with_flag("disabled", index + 1 == self.sections.len()),
            )
            .with_child(action("toggle-hidden", if section.hidden { "Show" } else { "Hide" }))
            .with_child(action("remove-section", "Remove"));

        let mut frame = VNode::element("div")
            .with_class("pc-section-frame")
            .with_attr("data-section-id", section.id.as_str());
        if section.hidden {
            frame = frame.with_class("pc-section-frame--hidden");
        }

        frame
            .with_child(bar)
            .with_child(component.render(section, &ctx))
    }

    fn insert_menu(&self) -> VNode {
        let options = self.registry.known_types().into_iter().map(|section_type| {
            let label = self.registry.resolve(section_type).label().to_string();
            VNode::text_element("option", label).with_attr("value", section_type)
        });

        VNode::element("div")
            .with_class("pc-insert")
            .with_child(
                VNode::element("select")
                    .with_attr("name", "section-type")
                    .with_children(options),
            )
            .with_child(
                VNode::text_element("button", "Add section")
                    .with_attr("type", "button")
                    .with_attr("data-action", "insert-section"),
            )
    }
}

impl<S> std::fmt::Debug for PageComposer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageComposer")
            .field("layout_id", &self.layout_id)
            .field("sections", &self.sections.len())
            .field("versions", &self.versions.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

/// Holds `is_saving` up for the lifetime of a save, including one whose
/// future is dropped before the store answers.
struct SavingFlag<'a>(&'a mut bool);

impl<'a> SavingFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        SavingFlag(flag)
    }
}

impl Drop for SavingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

