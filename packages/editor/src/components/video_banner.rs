use super::{optional_text, section_root};
use crate::fields::FieldSpec;
use crate::registry::SectionView;
use pagecraft_model::{Section, VideoBannerContent};
use pagecraft_render::VNode;

pub struct VideoBannerView;

impl SectionView for VideoBannerView {
    type Content = VideoBannerContent;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("title", "Title"),
            FieldSpec::video("videoUrl", "Video"),
            FieldSpec::image("posterImage", "Poster image"),
            FieldSpec::checkbox("autoplay", "Autoplay"),
            FieldSpec::checkbox("loop", "Loop"),
            FieldSpec::checkbox("muted", "Muted"),
            FieldSpec::range("height", "Height", 240.0, 960.0, 10.0),
        ]
    }

    fn view(section: &Section, content: &VideoBannerContent) -> VNode {
        let root = section_root(section, "pc-video-banner")
            .with_style("height", format!("{}px", content.height));

        let media = if content.video_url.is_empty() {
            VNode::text_element("div", "No video selected").with_class("pc-video-banner__empty")
        } else {
            let mut video = VNode::element("video")
                .with_attr("src", content.video_url.as_str())
                .with_flag("autoplay", content.autoplay)
                .with_flag("loop", content.loop_video)
                .with_flag("muted", content.muted)
                .with_flag("playsinline", true);
            if !content.poster_image.is_empty() {
                video = video.with_attr("poster", content.poster_image.as_str());
            }
            video
        };

        root.with_child(media)
            .with_children(optional_text("h2", "pc-video-banner__title", &content.title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::ContentMap;
    use serde_json::json;

    #[test]
    fn test_video_flags() {
        let mut section = Section::with_content("v-1", "video-banner", ContentMap::new());
        section.content.insert("videoUrl".into(), json!("/media/intro.mp4"));
        section.content.insert("loop".into(), json!(false));

        let node = VideoBannerView::view(&section, &section.decode());
        let video = node.find(&|n| n.tag() == Some("video")).unwrap();

        assert_eq!(video.attr("src"), Some("/media/intro.mp4"));
        assert!(video.attr("autoplay").is_some());
        assert!(video.attr("loop").is_none());
        assert_eq!(node.style("height"), Some("520px"));
    }

    #[test]
    fn test_placeholder_without_video() {
        let section = Section::with_content("v-1", "video-banner", ContentMap::new());
        let node = VideoBannerView::view(&section, &section.decode());

        assert!(node.find_class("pc-video-banner__empty").is_some());
    }
}
