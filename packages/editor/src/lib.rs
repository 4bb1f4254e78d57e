//! # Pagecraft Editor
//!
//! Section components, the section registry and the page editing state.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Section { id, type, content }        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ registry: type → SectionComponent           │
//! │  - typed views for known types              │
//! │  - generic JSON editor for everything else  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ composer: working copy, save/revert         │
//! │ shell: mode, navigation, notices            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ render: VNode → HTML                        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Stored content is the source of truth**: typed views are derived
//! 2. **Total resolution**: every section type renders, unknown ones generically
//! 3. **Local until saved**: edits never reach the store before `save`
//! 4. **Server authority**: a successful save or revert replaces the working copy
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{ControlInput, Credentials, Mode, PageComposer};
//!
//! let mut composer = PageComposer::new(&layout, store, Credentials::with_session(token));
//! composer.apply_input("hero-1", ControlInput::set("title", "Building"))?;
//! composer.save(false, Some("New headline".into())).await?;
//!
//! let page = composer.render_page(Mode::Viewing);
//! ```

mod auth;
pub mod components;
mod composer;
mod errors;
mod fields;
mod mutations;
mod notifications;
mod registry;
mod shell;

pub use auth::{Credentials, TOKEN_ENV};
pub use components::generic::{parse_content, pretty_content, GenericSection, JsonDraft, GENERIC_TYPE};
pub use components::SITE_CSS;
pub use composer::{MediaTarget, PageComposer, SaveOutcome};
pub use errors::{ComposerError, EditorError, FieldError};
pub use fields::{display_value, ControlInput, FieldKind, FieldSpec, MediaKind};
pub use mutations::{MutationError, PageMutation};
pub use notifications::{Notice, NoticeKind, Notifications, TOAST_DURATION};
pub use registry::{
    editor_frame, patch, ContentUpdate, Mode, Registry, RenderContext, SectionComponent,
    SectionView, Typed,
};
pub use shell::{Confirm, EditMode, HostShell, KeyPress, NavigationBar, LOGIN_PATH, NAV_HIDE_THRESHOLD};
