use super::{optional_text, section_root};
use crate::fields::FieldSpec;
use crate::registry::SectionView;
use pagecraft_model::{RichTextContent, Section};
use pagecraft_render::VNode;

pub struct RichTextView;

impl SectionView for RichTextView {
    type Content = RichTextContent;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("heading", "Heading"),
            FieldSpec::textarea("body", "Body"),
            FieldSpec::range("maxWidth", "Maximum width", 480.0, 1440.0, 20.0),
        ]
    }

    fn view(section: &Section, content: &RichTextContent) -> VNode {
        // Single newlines inside a paragraph become line breaks
        let paragraphs = content.paragraphs().into_iter().map(|paragraph| {
            let mut node = VNode::element("p");
            for (index, line) in paragraph.lines().enumerate() {
                if index > 0 {
                    node = node.with_child(VNode::element("br"));
                }
                node = node.with_child(VNode::text(line));
            }
            node
        });

        section_root(section, "pc-rich-text")
            .with_style("max-width", format!("{}px", content.max_width))
            .with_children(optional_text("h2", "pc-rich-text__heading", &content.heading))
            .with_children(paragraphs)
    }
}
