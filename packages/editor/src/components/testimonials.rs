use super::{item_template, optional_text, section_root};
use crate::fields::FieldSpec;
use crate::registry::SectionView;
use pagecraft_model::{Section, TestimonialItem, TestimonialsContent};
use pagecraft_render::VNode;

pub struct TestimonialsView;

impl SectionView for TestimonialsView {
    type Content = TestimonialsContent;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("heading", "Heading"),
            FieldSpec::checkbox("autoplay", "Rotate automatically"),
            FieldSpec::repeatable(
                "testimonials",
                "Testimonial",
                vec![
                    FieldSpec::textarea("quote", "Quote"),
                    FieldSpec::text("author", "Author"),
                    FieldSpec::text("role", "Role"),
                    FieldSpec::image("avatar", "Avatar"),
                ],
                item_template(&[("quote", ""), ("author", ""), ("role", ""), ("avatar", "")]),
            ),
        ]
    }

    fn view(section: &Section, content: &TestimonialsContent) -> VNode {
        let list = VNode::element("div")
            .with_class("pc-testimonials__list")
            .with_attr("data-autoplay", content.autoplay.to_string())
            .with_children(content.testimonials.iter().map(testimonial));

        section_root(section, "pc-testimonials")
            .with_children(optional_text("h2", "pc-testimonials__heading", &content.heading))
            .with_child(list)
    }
}

fn testimonial(item: &TestimonialItem) -> VNode {
    let mut caption = VNode::element("figcaption");
    if !item.avatar.is_empty() {
        caption = caption.with_child(
            VNode::element("img")
                .with_class("pc-testimonial__avatar")
                .with_attr("src", item.avatar.as_str())
                .with_attr("alt", item.author.as_str()),
        );
    }
    caption = caption
        .with_children(optional_text("strong", "pc-testimonial__author", &item.author))
        .with_children(optional_text("span", "pc-testimonial__role", &item.role));

    VNode::element("figure")
        .with_class("pc-card")
        .with_class("pc-testimonial")
        .with_attr("data-item-id", item.id.as_str())
        .with_child(VNode::text_element("blockquote", item.quote.as_str()))
        .with_child(caption)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::ContentMap;
    use serde_json::json;

    #[test]
    fn test_testimonial_without_avatar() {
        let section = Section::with_content("t-1", "testimonials", ContentMap::new());
        let node = TestimonialsView::view(&section, &section.decode());

        assert_eq!(node.find_all(&|n| n.has_class("pc-testimonial")).len(), 1);
        assert!(node.find_class("pc-testimonial__avatar").is_none());
        assert_eq!(
            node.find_class("pc-testimonial__author").unwrap().text_content(),
            "Jordan Lee"
        );
    }

    #[test]
    fn test_autoplay_flag_exposed() {
        let mut section = Section::with_content("t-1", "testimonials", ContentMap::new());
        section.content.insert("autoplay".into(), json!(true));

        let node = TestimonialsView::view(&section, &section.decode());
        let list = node.find_class("pc-testimonials__list").unwrap();
        assert_eq!(list.attr("data-autoplay"), Some("true"));
    }
}
