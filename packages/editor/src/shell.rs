//! # Host Shell
//!
//! Top-level state around one page: the edit mode, the navigation bar,
//! notices, and the admin toolbar.
//!
//! ```text
//!            Ctrl/Cmd+E (admin)          open history
//!  Viewing ◄─────────────────────► Editing ◄──────────► VersionHistory
//!     ▲        publish succeeds         ▲     Escape / revert succeeds
//!     └─────────────────────────────────┘
//! ```
//!
//! The shell owns the mode and passes it down by value; components never
//! decide on their own whether they are editing.

use crate::composer::{PageComposer, SaveOutcome};
use crate::errors::ComposerError;
use crate::notifications::{NoticeKind, Notifications};
use crate::registry::Mode;
use pagecraft_model::{LayoutStore, NavigationItem};
use pagecraft_render::VNode;
use std::time::Instant;

/// Scroll distance before the navigation bar may hide
pub const NAV_HIDE_THRESHOLD: f64 = 80.0;

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Viewing,
    Editing,
    /// Version list open on top of editing
    VersionHistory,
}

impl EditMode {
    /// Rendering mode for sections
    pub fn section_mode(self) -> Mode {
        match self {
            EditMode::Viewing => Mode::Viewing,
            EditMode::Editing | EditMode::VersionHistory => Mode::Editing,
        }
    }
}

/// Yes/no prompt shown before destructive actions
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn plain(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
        }
    }

    pub fn ctrl(key: impl Into<String>) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    pub fn meta(key: impl Into<String>) -> Self {
        Self {
            meta: true,
            ..Self::plain(key)
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavigationBar {
    items: Vec<NavigationItem>,
    visible: bool,
    expanded_menu: Option<String>,
    last_scroll_y: f64,
}

impl NavigationBar {
    pub fn new(items: Vec<NavigationItem>) -> Self {
        Self {
            items,
            visible: true,
            expanded_menu: None,
            last_scroll_y: 0.0,
        }
    }

    pub fn items(&self) -> &[NavigationItem] {
        &self.items
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn expanded_menu(&self) -> Option<&str> {
        self.expanded_menu.as_deref()
    }

    fn on_scroll(&mut self, y: f64, pinned: bool) {
        let delta = y - self.last_scroll_y;
        self.last_scroll_y = y;

        if pinned || y <= NAV_HIDE_THRESHOLD || delta < 0.0 {
            self.visible = true;
        } else if delta > 0.0 {
            self.visible = false;
            self.expanded_menu = None;
        }
    }

    /// Header menu with `current_slug` marked as the current page
    pub fn render(&self, current_slug: &str) -> VNode {
        let mut nav = VNode::element("nav")
            .with_class("pc-nav")
            .with_attr("aria-label", "Main");
        if !self.visible {
            nav = nav.with_class("pc-nav--hidden");
        }

        let entries = self.items.iter().map(|item| {
            let href = if item.slug == "home" {
                "/".to_string()
            } else {
                format!("/{}", item.slug)
            };
            let mut link = VNode::text_element("a", item.name.as_str()).with_attr("href", href);
            if item.slug == current_slug {
                link = link.with_attr("aria-current", "page");
            }

            let mut entry = VNode::element("div")
                .with_class("pc-nav__item")
                .with_attr("data-nav-id", item.id.as_str())
                .with_child(link);

            if !item.submenu.is_empty() {
                let expanded = self.expanded_menu.as_deref() == Some(item.id.as_str());
                entry = entry
                    .with_child(
                        VNode::text_element("button", "▾")
                            .with_attr("type", "button")
                            .with_attr("data-action", "toggle-menu")
                            .with_attr("aria-expanded", expanded.to_string()),
                    )
                    .with_child(submenu(item, expanded));
            }
            entry
        });

        nav.with_children(entries)
    }
}

fn submenu(item: &NavigationItem, expanded: bool) -> VNode {
    VNode::element("div")
        .with_class("pc-nav__submenu")
        .with_flag("hidden", !expanded)
        .with_children(item.submenu.iter().map(|child| {
            let mut link = VNode::element("a")
                .with_attr("href", format!("/{}", child.slug))
                .with_child(VNode::text_element("strong", child.name.as_str()));
            if let Some(tag_line) = &child.tag_line {
                link = link.with_child(VNode::text_element("span", tag_line.as_str()));
            }
            link
        }))
}

pub struct HostShell<S> {
    composer: PageComposer<S>,
    mode: EditMode,
    is_admin: bool,
    nav: NavigationBar,
    notifications: Notifications,
}

impl<S: LayoutStore> HostShell<S> {
    pub fn new(composer: PageComposer<S>, navigation: Vec<NavigationItem>, is_admin: bool) -> Self {
        Self {
            composer,
            mode: EditMode::Viewing,
            is_admin,
            nav: NavigationBar::new(navigation),
            notifications: Notifications::new(),
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn composer(&self) -> &PageComposer<S> {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut PageComposer<S> {
        &mut self.composer
    }

    pub fn navigation(&self) -> &NavigationBar {
        &self.nav
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Enter or leave edit mode. Non-admins stay in viewing.
    pub fn toggle_edit(&mut self) -> EditMode {
        if !self.is_admin {
            tracing::debug!("edit mode requested without admin rights");
            return self.mode;
        }
        self.mode = match self.mode {
            EditMode::Viewing => EditMode::Editing,
            EditMode::Editing | EditMode::VersionHistory => EditMode::Viewing,
        };
        if self.mode != EditMode::Viewing {
            self.nav.visible = true;
        }
        self.mode
    }

    pub fn open_history(&mut self) {
        if self.mode == EditMode::Editing {
            self.mode = EditMode::VersionHistory;
        }
    }

    pub fn close_history(&mut self) {
        if self.mode == EditMode::VersionHistory {
            self.mode = EditMode::Editing;
        }
    }

    pub fn on_scroll(&mut self, y: f64) {
        let pinned = self.mode != EditMode::Viewing;
        self.nav.on_scroll(y, pinned);
    }

    /// Keyboard shortcuts; returns whether the key was handled
    pub fn handle_key(&mut self, key: &KeyPress) -> bool {
        if (key.ctrl || key.meta) && key.key.eq_ignore_ascii_case("e") {
            if !self.is_admin {
                return false;
            }
            self.toggle_edit();
            return true;
        }

        if key.key == "Escape" {
            if self.mode == EditMode::VersionHistory {
                self.close_history();
                return true;
            }
            if self.nav.expanded_menu.take().is_some() {
                return true;
            }
        }
        false
    }

    pub fn toggle_menu(&mut self, item_id: &str) {
        self.nav.expanded_menu = match self.nav.expanded_menu.as_deref() {
            Some(open) if open == item_id => None,
            _ => Some(item_id.to_string()),
        };
    }

    /// Click landed outside the expanded menu
    pub fn click_outside(&mut self) {
        self.nav.expanded_menu = None;
    }

    /// Save through the composer and report the result to the user
    pub async fn save(
        &mut self,
        is_draft: bool,
        notes: Option<String>,
        now: Instant,
    ) -> Result<SaveOutcome, ComposerError> {
        let result = self.composer.save(is_draft, notes).await;
        match &result {
            Ok(SaveOutcome::Published) => {
                self.mode = EditMode::Viewing;
                self.notifications.toast("Page published", now);
            }
            Ok(SaveOutcome::Drafted) => {
                self.notifications.toast("Draft saved", now);
            }
            Err(ComposerError::NotLoggedIn) => {
                self.notifications.warning(
                    ComposerError::NotLoggedIn.to_string(),
                    Some(("Log in", LOGIN_PATH)),
                );
            }
            Err(err) => {
                self.notifications
                    .toast(format!("Failed to save changes: {}", err), now);
            }
        }
        result
    }

    /// Revert after confirmation. Returns whether the revert happened.
    pub async fn revert(
        &mut self,
        version_id: &str,
        confirm: &mut impl Confirm,
        now: Instant,
    ) -> bool {
        let message = format!(
            "Revert to version {}? Unsaved changes will be lost.",
            version_id
        );
        if !confirm.confirm(&message) {
            return false;
        }

        match self.composer.revert(version_id).await {
            Ok(()) => {
                self.close_history();
                self.notifications
                    .toast(format!("Reverted to version {}", version_id), now);
                true
            }
            Err(err) => {
                self.notifications
                    .alert(format!("Failed to revert: {}", err));
                false
            }
        }
    }

    /// Whole page: navigation, sections, admin chrome and notices
    pub fn render(&self, now: Instant) -> VNode {
        let mut body = VNode::element("div")
            .with_class("pc-shell")
            .with_attr("data-mode", mode_name(self.mode))
            .with_child(self.nav.render(self.composer.slug()))
            .with_child(self.composer.render_page(self.mode.section_mode()));

        if self.is_admin {
            body = body.with_child(self.toolbar());
        }
        if self.mode == EditMode::VersionHistory {
            body = body.with_child(self.history_panel());
        }

        body.with_children(self.notifications.active(now).into_iter().map(|notice| {
            let mut node = VNode::text_element("div", notice.message.as_str())
                .with_class("pc-notice")
                .with_class(format!("pc-notice--{}", notice.kind.as_str()))
                .with_attr("data-notice-id", notice.id.to_string());
            if notice.kind == NoticeKind::Alert {
                node = node.with_attr("role", "alertdialog");
            }
            if let Some((label, href)) = &notice.link {
                node = node.with_child(
                    VNode::text_element("a", label.as_str()).with_attr("href", href.as_str()),
                );
            }
            node
        }))
    }

    fn toolbar(&self) -> VNode {
        let button = |action: &str, label: &str| {
            VNode::text_element("button", label)
                .with_attr("type", "button")
                .with_attr("data-action", action)
        };

        let toolbar = VNode::element("div").with_class("pc-toolbar");
        match self.mode {
            EditMode::Viewing => toolbar.with_child(button("toggle-edit", "Edit page")),
            EditMode::Editing | EditMode::VersionHistory => {
                let saving = self.composer.is_saving();
                let publish_label = if saving { "Saving..." } else { "Publish" };
                toolbar
                    .with_child(button("save-draft", "Save draft").with_flag("disabled", saving))
                    .with_child(button("publish", publish_label).with_flag("disabled", saving))
                    .with_child(button("open-history", "Version history"))
                    .with_child(button("toggle-edit", "Exit editor"))
            }
        }
    }

    fn history_panel(&self) -> VNode {
        let entries = self.composer.versions().iter().rev().map(|version| {
            let status = if version.is_draft { "Draft" } else { "Published" };
            VNode::element("li")
                .with_class("pc-history__entry")
                .with_attr("data-version-id", version.version_id.as_str())
                .with_child(VNode::text_element("strong", version.version_id.as_str()))
                .with_child(VNode::text_element("span", status))
                .with_child(VNode::text_element(
                    "time",
                    version.created_at.format("%Y-%m-%d %H:%M").to_string(),
                ))
                .with_children(
                    version
                        .notes
                        .as_deref()
                        .map(|notes| VNode::text_element("p", notes)),
                )
                .with_child(
                    VNode::text_element("button", "Revert")
                        .with_attr("type", "button")
                        .with_attr("data-action", "revert")
                        .with_attr("data-version-id", version.version_id.as_str()),
                )
        });

        VNode::element("aside")
            .with_class("pc-history")
            .with_child(VNode::text_element("h2", "Version history"))
            .with_child(VNode::element("ol").with_children(entries))
    }
}

fn mode_name(mode: EditMode) -> &'static str {
    match mode {
        EditMode::Viewing => "viewing",
        EditMode::Editing => "editing",
        EditMode::VersionHistory => "history",
    }
}
