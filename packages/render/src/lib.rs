//! # Pagecraft Render
//!
//! Virtual DOM produced by section components and the HTML writer that
//! turns it into markup for the published site and the editor preview.

mod html;
mod vdom;


pub use html::{render_document, render_html, HtmlOptions};
pub use vdom::VNode;
