use super::{button_link, optional_text, section_root};
use crate::fields::FieldSpec;
use crate::registry::SectionView;
use pagecraft_model::{HeroContent, Section};
use pagecraft_render::VNode;

pub struct HeroView;

impl SectionView for HeroView {
    type Content = HeroContent;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("title", "Title"),
            FieldSpec::text("subtitle", "Subtitle"),
            FieldSpec::textarea("description", "Description"),
            FieldSpec::image("backgroundImage", "Background image"),
            FieldSpec::video("backgroundVideo", "Background video"),
            FieldSpec::color("overlayColor", "Overlay colour"),
            FieldSpec::range("overlayOpacity", "Overlay opacity", 0.0, 1.0, 0.05),
            FieldSpec::text("primaryCtaText", "Primary button text"),
            FieldSpec::text("primaryCtaLink", "Primary button link"),
            FieldSpec::text("secondaryCtaText", "Secondary button text"),
            FieldSpec::text("secondaryCtaLink", "Secondary button link"),
            FieldSpec::select(
                "alignment",
                "Alignment",
                &[("left", "Left"), ("center", "Center"), ("right", "Right")],
            ),
            FieldSpec::color("textColor", "Text colour"),
        ]
    }

    fn view(section: &Section, content: &HeroContent) -> VNode {
        let mut root = section_root(section, "pc-hero")
            .with_style("color", content.text_color.as_str())
            .with_style("text-align", content.alignment.as_str());

        if !content.background_image.is_empty() {
            root = root.with_style(
                "background-image",
                format!("url('{}')", content.background_image),
            );
        }

        if !content.background_video.is_empty() {
            root = root.with_child(
                VNode::element("video")
                    .with_class("pc-hero__video")
                    .with_attr("src", content.background_video.as_str())
                    .with_flag("autoplay", true)
                    .with_flag("loop", true)
                    .with_flag("muted", true)
                    .with_flag("playsinline", true),
            );
        }

        let overlay = VNode::element("div")
            .with_class("pc-hero__overlay")
            .with_style("background-color", content.overlay_color.as_str())
            .with_style("opacity", content.overlay_opacity.clamp(0.0, 1.0).to_string());

        let actions = VNode::element("div").with_class("pc-hero__actions").with_children(
            [
                button_link(&content.primary_cta_text, &content.primary_cta_link, "pc-button--primary"),
                button_link(
                    &content.secondary_cta_text,
                    &content.secondary_cta_link,
                    "pc-button--secondary",
                ),
            ]
            .into_iter()
            .flatten(),
        );

        let body = VNode::element("div")
            .with_class("pc-hero__body")
            .with_child(VNode::text_element("h1", content.title.as_str()).with_class("pc-hero__title"))
            .with_children(optional_text("h2", "pc-hero__subtitle", &content.subtitle))
            .with_children(optional_text("p", "pc-hero__description", &content.description))
            .with_child(actions);

        root.with_child(overlay).with_child(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Registry, RenderContext};
    use pagecraft_model::ContentMap;
    use serde_json::json;

    #[test]
    fn test_empty_hero_shows_defaults() {
        let section = Section::with_content("hero-1", "hero", ContentMap::new());
        let node = Registry::new().render(&section, &RenderContext::viewing());

        assert_eq!(node.find_class("pc-hero__title").unwrap().text_content(), "Integrating");
        assert_eq!(
            node.find_class("pc-hero__subtitle").unwrap().text_content(),
            "Sustainable Infrastructure"
        );
        assert_eq!(node.style("text-align"), Some("center"));
    }

    #[test]
    fn test_background_and_secondary_cta() {
        let mut section = Section::with_content("hero-1", "hero", ContentMap::new());
        section.content.insert("backgroundImage".into(), json!("/media/site.jpg"));
        section.content.insert("secondaryCtaText".into(), json!("About"));
        section.content.insert("secondaryCtaLink".into(), json!("/about"));

        let node = HeroView::view(&section, &section.decode());

        assert_eq!(node.style("background-image"), Some("url('/media/site.jpg')"));
        let secondary = node.find_class("pc-button--secondary").unwrap();
        assert_eq!(secondary.attr("href"), Some("/about"));
    }

    #[test]
    fn test_invalid_alignment_falls_back() {
        let mut section = Section::with_content("hero-1", "hero", ContentMap::new());
        section.content.insert("alignment".into(), json!("diagonal"));
        section.content.insert("title".into(), json!("Kept"));

        let node = HeroView::view(&section, &section.decode());

        assert_eq!(node.style("text-align"), Some("center"));
        assert_eq!(node.find_class("pc-hero__title").unwrap().text_content(), "Kept");
    }
}
