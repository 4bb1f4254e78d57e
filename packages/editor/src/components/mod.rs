//! Built-in section components.
//!
//! Every view renders to a `section.pc-section` root carrying the section id,
//! so page-level chrome can find sections by id in both modes.

pub mod call_to_action;
pub mod feature_grid;
pub mod generic;
pub mod hero;
pub mod rich_text;
pub mod services;
pub mod stat_cards;
pub mod testimonials;
pub mod video_banner;

use pagecraft_model::{ContentMap, Section};
use pagecraft_render::VNode;
use serde_json::Value;

/// Root element of a section view
pub(crate) fn section_root(section: &Section, class: &str) -> VNode {
    VNode::element("section")
        .with_class("pc-section")
        .with_class(class)
        .with_attr("id", section.id.as_str())
        .with_attr("data-section-type", section.section_type.as_str())
}

/// Text element, or nothing when `text` is empty
pub(crate) fn optional_text(tag: &str, class: &str, text: &str) -> Option<VNode> {
    if text.trim().is_empty() {
        None
    } else {
        Some(VNode::text_element(tag, text).with_class(class))
    }
}

/// Link styled as a button, or nothing without text
pub(crate) fn button_link(text: &str, href: &str, class: &str) -> Option<VNode> {
    if text.trim().is_empty() {
        return None;
    }
    let href = if href.trim().is_empty() { "#" } else { href };
    Some(
        VNode::text_element("a", text)
            .with_class("pc-button")
            .with_class(class)
            .with_attr("href", href),
    )
}

/// Template for a newly added repeatable item
pub(crate) fn item_template(fields: &[(&str, &str)]) -> ContentMap {
    fields
        .iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect()
}

/// Base stylesheet embedded in every rendered page
pub const SITE_CSS: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, -apple-system, "Segoe UI", sans-serif; color: #1d2433; }
.pc-section { position: relative; padding: 64px 24px; }
.pc-button { display: inline-block; padding: 12px 28px; border-radius: 4px; text-decoration: none; font-weight: 600; }
.pc-button--primary { background: #0a7cff; color: #fff; }
.pc-button--secondary { border: 2px solid currentColor; color: inherit; }
.pc-hero { min-height: 560px; display: flex; align-items: center; color: #fff; background-size: cover; background-position: center; }
.pc-hero__overlay { position: absolute; inset: 0; }
.pc-hero__body { position: relative; max-width: 1100px; margin: 0 auto; width: 100%; }
.pc-hero__video { position: absolute; inset: 0; width: 100%; height: 100%; object-fit: cover; }
.pc-grid { display: grid; gap: 24px; max-width: 1100px; margin: 0 auto; }
.pc-card { background: #fff; border-radius: 8px; padding: 24px; box-shadow: 0 1px 3px rgba(0, 0, 0, 0.08); }
.pc-stat__value { font-size: 2.5rem; font-weight: 700; }
.pc-feature-grid--list .pc-grid { grid-template-columns: 1fr; }
.pc-testimonial blockquote { font-style: italic; margin: 0 0 12px; }
.pc-cta { text-align: center; }
.pc-cta--contained { max-width: 1100px; margin: 0 auto; border-radius: 8px; }
.pc-rich-text { margin: 0 auto; }
.pc-video-banner { padding: 0; overflow: hidden; }
.pc-video-banner video { width: 100%; height: 100%; object-fit: cover; }
.pc-generic pre { background: #f4f5f7; padding: 16px; overflow: auto; }
.pc-nav { position: sticky; top: 0; z-index: 10; display: flex; gap: 16px; padding: 12px 24px; background: #fff; transition: transform 0.2s; }
.pc-nav--hidden { transform: translateY(-100%); }
.pc-editor { display: grid; grid-template-columns: 3fr 2fr; gap: 16px; border: 2px dashed #0a7cff; }
.pc-editor__canvas { width: 166%; pointer-events: none; }
.pc-controls { display: flex; flex-direction: column; gap: 12px; }
.pc-field { display: flex; flex-direction: column; gap: 4px; }
.pc-field__error { color: #c62828; }
.pc-section-frame--hidden { opacity: 0.4; }
.pc-toolbar { position: fixed; bottom: 24px; right: 24px; display: flex; gap: 8px; z-index: 20; }
.pc-notice { position: fixed; top: 16px; right: 16px; padding: 12px 16px; border-radius: 4px; background: #1d2433; color: #fff; }
.pc-notice--warning { background: #b26a00; }
.pc-notice--alert { background: #c62828; }
"#;
