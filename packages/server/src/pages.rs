//! Server-side rendering of whole pages.

use pagecraft_editor::{Mode, NavigationBar, Registry, RenderContext, SITE_CSS};
use pagecraft_model::{Layout, NavigationItem};
use pagecraft_render::{render_document, HtmlOptions, VNode};

/// Render `layout` as a full HTML document.
///
/// Viewing shows the published, non-hidden sections. Editing shows every
/// working section (pending draft included) with its field controls.
pub fn render_layout_page(
    layout: &Layout,
    navigation: &[NavigationItem],
    registry: &Registry,
    mode: Mode,
) -> String {
    let nav = NavigationBar::new(navigation.to_vec()).render(&layout.slug);

    let page = VNode::element("main")
        .with_class("pc-page")
        .with_attr("data-layout-id", layout.id.as_str());

    let page = match mode {
        Mode::Viewing => page.with_children(
            layout
                .sections
                .iter()
                .filter(|section| !section.hidden)
                .map(|section| registry.render(section, &RenderContext::viewing())),
        ),
        Mode::Editing => page.with_class("pc-page--editing").with_children(
            layout
                .working_sections()
                .iter()
                .map(|section| registry.render(section, &RenderContext::editing(None))),
        ),
    };

    let title = if layout.name.is_empty() {
        layout.slug.as_str()
    } else {
        layout.name.as_str()
    };
    render_document(title, Some(SITE_CSS), &[nav, page], &HtmlOptions::default())
}

pub fn not_found_page(slug: &str) -> String {
    let body = VNode::element("main")
        .with_class("pc-page")
        .with_child(VNode::text_element("h1", "Page not found"))
        .with_child(VNode::text_element("p", format!("No page is published at /{}", slug)));
    render_document("Not found", Some(SITE_CSS), &[body], &HtmlOptions::default())
}
