use super::{item_template, optional_text, section_root};
use crate::fields::FieldSpec;
use crate::registry::SectionView;
use pagecraft_model::{Section, StatCardsContent, StatItem};
use pagecraft_render::VNode;

pub struct StatCardsView;

impl SectionView for StatCardsView {
    type Content = StatCardsContent;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("heading", "Heading"),
            FieldSpec::color("accentColor", "Accent colour"),
            FieldSpec::range("columns", "Columns", 1.0, 6.0, 1.0),
            FieldSpec::repeatable(
                "stats",
                "Stat",
                vec![
                    FieldSpec::text("value", "Value"),
                    FieldSpec::text("suffix", "Suffix"),
                    FieldSpec::text("label", "Label"),
                ],
                item_template(&[("value", "0"), ("suffix", ""), ("label", "New Stat")]),
            ),
        ]
    }

    fn view(section: &Section, content: &StatCardsContent) -> VNode {
        let columns = content.columns.clamp(1, 6);

        section_root(section, "pc-stat-cards")
            .with_children(optional_text("h2", "pc-stat-cards__heading", &content.heading))
            .with_child(
                VNode::element("div")
                    .with_class("pc-grid")
                    .with_style("grid-template-columns", format!("repeat({}, 1fr)", columns))
                    .with_children(
                        content
                            .stats
                            .iter()
                            .map(|stat| stat_card(stat, &content.accent_color)),
                    ),
            )
    }
}

fn stat_card(stat: &StatItem, accent: &str) -> VNode {
    VNode::element("div")
        .with_class("pc-card")
        .with_class("pc-stat")
        .with_attr("data-item-id", stat.id.as_str())
        .with_child(
            VNode::text_element("span", format!("{}{}", stat.value, stat.suffix))
                .with_class("pc-stat__value")
                .with_style("color", accent),
        )
        .with_child(VNode::text_element("span", stat.label.as_str()).with_class("pc-stat__label"))
}
