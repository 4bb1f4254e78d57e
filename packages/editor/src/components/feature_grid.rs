use super::{item_template, optional_text, section_root};
use crate::fields::FieldSpec;
use crate::registry::SectionView;
use pagecraft_model::{FeatureGridContent, FeatureItem, FeatureLayout, Section};
use pagecraft_render::VNode;

pub struct FeatureGridView;

impl SectionView for FeatureGridView {
    type Content = FeatureGridContent;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("heading", "Heading"),
            FieldSpec::textarea("subheading", "Subheading"),
            FieldSpec::select("layout", "Layout", &[("grid", "Grid"), ("list", "List")]),
            FieldSpec::repeatable(
                "features",
                "Feature",
                vec![
                    FieldSpec::text("title", "Title"),
                    FieldSpec::textarea("description", "Description"),
                    FieldSpec::image("image", "Image"),
                ],
                item_template(&[("title", "New Feature"), ("description", ""), ("image", "")]),
            ),
        ]
    }

    fn view(section: &Section, content: &FeatureGridContent) -> VNode {
        let columns = match content.layout {
            FeatureLayout::Grid => content.features.len().clamp(1, 3),
            FeatureLayout::List => 1,
        };

        section_root(section, "pc-feature-grid")
            .with_class(format!("pc-feature-grid--{}", content.layout.as_str()))
            .with_children(optional_text("h2", "pc-feature-grid__heading", &content.heading))
            .with_children(optional_text("p", "pc-feature-grid__subheading", &content.subheading))
            .with_child(
                VNode::element("div")
                    .with_class("pc-grid")
                    .with_style("grid-template-columns", format!("repeat({}, 1fr)", columns))
                    .with_children(content.features.iter().map(feature)),
            )
    }
}

fn feature(item: &FeatureItem) -> VNode {
    let mut card = VNode::element("div")
        .with_class("pc-card")
        .with_class("pc-feature")
        .with_attr("data-item-id", item.id.as_str());

    if !item.image.is_empty() {
        card = card.with_child(
            VNode::element("img")
                .with_attr("src", item.image.as_str())
                .with_attr("alt", item.title.as_str()),
        );
    }

    card.with_child(VNode::text_element("h3", item.title.as_str()))
        .with_children(optional_text("p", "pc-feature__description", &item.description))
}
