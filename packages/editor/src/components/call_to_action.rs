use super::{button_link, optional_text, section_root};
use crate::fields::FieldSpec;
use crate::registry::SectionView;
use pagecraft_model::{CallToActionContent, Section};
use pagecraft_render::VNode;

pub struct CallToActionView;

impl SectionView for CallToActionView {
    type Content = CallToActionContent;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("title", "Title"),
            FieldSpec::textarea("body", "Body"),
            FieldSpec::text("buttonText", "Button text"),
            FieldSpec::text("buttonLink", "Button link"),
            FieldSpec::color("backgroundColor", "Background colour"),
            FieldSpec::color("textColor", "Text colour"),
            FieldSpec::checkbox("fullWidth", "Full width"),
        ]
    }

    fn view(section: &Section, content: &CallToActionContent) -> VNode {
        let width_class = if content.full_width {
            "pc-cta--full"
        } else {
            "pc-cta--contained"
        };

        section_root(section, "pc-cta")
            .with_class(width_class)
            .with_style("background-color", content.background_color.as_str())
            .with_style("color", content.text_color.as_str())
            .with_child(VNode::text_element("h2", content.title.as_str()).with_class("pc-cta__title"))
            .with_children(optional_text("p", "pc-cta__body", &content.body))
            .with_children(button_link(
                &content.button_text,
                &content.button_link,
                "pc-button--secondary",
            ))
    }
}
