//! # Typed Section Content
//!
//! Each known section type has a content struct whose `Default` carries the
//! documented defaults. Stored content is decoded leniently:
//!
//! - a missing field takes its default
//! - a field whose stored value has the wrong shape takes its default
//! - unknown fields are ignored (they stay in the stored map)
//! - array items are decoded one by one with the same rules, so one bad
//!   value only costs that value, never the whole list
//! - numeric item ids and stat values are read as their decimal text
//!
//! Decoding never fails, so rendering a section never fails either.

use crate::section::ContentMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Closed set of section types with a dedicated component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    Hero,
    HomeServices,
    StatCards,
    Testimonials,
    FeatureGrid,
    CallToAction,
    RichText,
    VideoBanner,
}

impl SectionKind {
    pub const ALL: [SectionKind; 8] = [
        SectionKind::Hero,
        SectionKind::HomeServices,
        SectionKind::StatCards,
        SectionKind::Testimonials,
        SectionKind::FeatureGrid,
        SectionKind::CallToAction,
        SectionKind::RichText,
        SectionKind::VideoBanner,
    ];

    /// Wire name stored in `Section::section_type`
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::HomeServices => "home-services",
            SectionKind::StatCards => "stat-cards",
            SectionKind::Testimonials => "testimonials",
            SectionKind::FeatureGrid => "feature-grid",
            SectionKind::CallToAction => "call-to-action",
            SectionKind::RichText => "rich-text",
            SectionKind::VideoBanner => "video-banner",
        }
    }

    /// Parse a wire name. Unknown names are `None`, never an error.
    pub fn parse(section_type: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == section_type)
    }

    /// Human-readable name for editor chrome
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Hero => "Hero Banner",
            SectionKind::HomeServices => "Services",
            SectionKind::StatCards => "Stat Cards",
            SectionKind::Testimonials => "Testimonials",
            SectionKind::FeatureGrid => "Feature Grid",
            SectionKind::CallToAction => "Call to Action",
            SectionKind::RichText => "Rich Text",
            SectionKind::VideoBanner => "Video Banner",
        }
    }

    /// Default content of this kind as a stored map
    pub fn default_content(self) -> ContentMap {
        match self {
            SectionKind::Hero => to_map(&HeroContent::default()),
            SectionKind::HomeServices => to_map(&ServicesContent::default()),
            SectionKind::StatCards => to_map(&StatCardsContent::default()),
            SectionKind::Testimonials => to_map(&TestimonialsContent::default()),
            SectionKind::FeatureGrid => to_map(&FeatureGridContent::default()),
            SectionKind::CallToAction => to_map(&CallToActionContent::default()),
            SectionKind::RichText => to_map(&RichTextContent::default()),
            SectionKind::VideoBanner => to_map(&VideoBannerContent::default()),
        }
    }

    /// Field names this kind's content understands
    pub fn field_names(self) -> Vec<String> {
        self.default_content().keys().cloned().collect()
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed content of one section kind
pub trait SectionContent:
    Serialize + DeserializeOwned + Default + Clone + std::fmt::Debug
{
    const KIND: SectionKind;

    /// Serialize back into the stored representation
    fn to_content(&self) -> ContentMap {
        to_map(self)
    }
}

fn to_map<T: Serialize>(content: &T) -> ContentMap {
    match serde_json::to_value(content) {
        Ok(Value::Object(map)) => map,
        _ => ContentMap::new(),
    }
}

/// Decode stored content, dropping any field that does not fit its type.
pub fn decode_lenient<T: DeserializeOwned + Default>(content: &ContentMap) -> T {
    if let Ok(decoded) = serde_json::from_value(Value::Object(content.clone())) {
        return decoded;
    }

    let mut accepted = ContentMap::new();
    let mut rejected = Vec::new();
    for (key, value) in content {
        let mut single = ContentMap::new();
        single.insert(key.clone(), value.clone());
        if serde_json::from_value::<T>(Value::Object(single)).is_ok() {
            accepted.insert(key.clone(), value.clone());
        } else {
            rejected.push(key.as_str());
        }
    }

    tracing::warn!(fields = ?rejected, "content fields fell back to defaults");
    serde_json::from_value(Value::Object(accepted)).unwrap_or_default()
}

/// Item list decoded per item. Non-object entries become default items so
/// positions still line up with the stored array.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values
        .iter()
        .map(|value| match value {
            Value::Object(item) => decode_lenient(item),
            _ => T::default(),
        })
        .collect())
}

/// Text field that also accepts a JSON number
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, found {}",
            other
        ))),
    }
}

// ============================================================================
// hero
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub background_image: String,
    pub background_video: String,
    pub overlay_color: String,
    pub overlay_opacity: f64,
    pub primary_cta_text: String,
    pub primary_cta_link: String,
    pub secondary_cta_text: String,
    pub secondary_cta_link: String,
    pub alignment: Alignment,
    pub text_color: String,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            title: "Integrating".to_string(),
            subtitle: "Sustainable Infrastructure".to_string(),
            description: String::new(),
            background_image: String::new(),
            background_video: String::new(),
            overlay_color: "#000000".to_string(),
            overlay_opacity: 0.5,
            primary_cta_text: "Our Services".to_string(),
            primary_cta_link: "/services".to_string(),
            secondary_cta_text: String::new(),
            secondary_cta_link: String::new(),
            alignment: Alignment::Center,
            text_color: "#ffffff".to_string(),
        }
    }
}

impl SectionContent for HeroContent {
    const KIND: SectionKind = SectionKind::Hero;
}

// ============================================================================
// home-services
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicesContent {
    pub heading: String,
    pub intro: String,
    pub background_color: String,
    #[serde(deserialize_with = "lenient_items")]
    pub services: Vec<ServiceItem>,
}

impl Default for ServicesContent {
    fn default() -> Self {
        let service = |id: &str, title: &str, description: &str, icon: &str, link: &str| {
            ServiceItem {
                id: id.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                icon: icon.to_string(),
                link: link.to_string(),
            }
        };

        Self {
            heading: "Our Services".to_string(),
            intro: String::new(),
            background_color: "#f8f9fa".to_string(),
            services: vec![
                service(
                    "service-1",
                    "Civil Engineering",
                    "Design and delivery of resilient public works.",
                    "bridge",
                    "/services/civil",
                ),
                service(
                    "service-2",
                    "Energy Systems",
                    "Grid integration for renewable generation.",
                    "bolt",
                    "/services/energy",
                ),
                service(
                    "service-3",
                    "Water Management",
                    "Treatment, storage and distribution networks.",
                    "water",
                    "/services/water",
                ),
            ],
        }
    }
}

impl SectionContent for ServicesContent {
    const KIND: SectionKind = SectionKind::HomeServices;
}

// ============================================================================
// stat-cards
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
    pub label: String,
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatCardsContent {
    pub heading: String,
    pub accent_color: String,
    pub columns: u32,
    #[serde(deserialize_with = "lenient_items")]
    pub stats: Vec<StatItem>,
}

impl Default for StatCardsContent {
    fn default() -> Self {
        let stat = |id: &str, value: &str, label: &str, suffix: &str| StatItem {
            id: id.to_string(),
            value: value.to_string(),
            label: label.to_string(),
            suffix: suffix.to_string(),
        };

        Self {
            heading: "By the Numbers".to_string(),
            accent_color: "#0a7cff".to_string(),
            columns: 4,
            stats: vec![
                stat("stat-1", "25", "Years of Experience", "+"),
                stat("stat-2", "1200", "Projects Delivered", ""),
                stat("stat-3", "98", "Client Retention", "%"),
                stat("stat-4", "15", "Countries", ""),
            ],
        }
    }
}

impl SectionContent for StatCardsContent {
    const KIND: SectionKind = SectionKind::StatCards;
}

// ============================================================================
// testimonials
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonialItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub quote: String,
    pub author: String,
    pub role: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonialsContent {
    pub heading: String,
    pub autoplay: bool,
    #[serde(deserialize_with = "lenient_items")]
    pub testimonials: Vec<TestimonialItem>,
}

impl Default for TestimonialsContent {
    fn default() -> Self {
        Self {
            heading: "What Our Clients Say".to_string(),
            autoplay: false,
            testimonials: vec![TestimonialItem {
                id: "testimonial-1".to_string(),
                quote: "They delivered on time and on budget.".to_string(),
                author: "Jordan Lee".to_string(),
                role: "Operations Director".to_string(),
                avatar: String::new(),
            }],
        }
    }
}

impl SectionContent for TestimonialsContent {
    const KIND: SectionKind = SectionKind::Testimonials;
}

// ============================================================================
// feature-grid
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureLayout {
    #[default]
    Grid,
    List,
}

impl FeatureLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureLayout::Grid => "grid",
            FeatureLayout::List => "list",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureGridContent {
    pub heading: String,
    pub subheading: String,
    pub layout: FeatureLayout,
    #[serde(deserialize_with = "lenient_items")]
    pub features: Vec<FeatureItem>,
}

impl Default for FeatureGridContent {
    fn default() -> Self {
        let feature = |id: &str, title: &str, description: &str| FeatureItem {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            image: String::new(),
        };

        Self {
            heading: "Why Choose Us".to_string(),
            subheading: String::new(),
            layout: FeatureLayout::Grid,
            features: vec![
                feature("feature-1", "Proven Delivery", "Decades of completed projects."),
                feature("feature-2", "Local Expertise", "Teams embedded in every region."),
                feature("feature-3", "Sustainable Focus", "Low-carbon design by default."),
            ],
        }
    }
}

impl SectionContent for FeatureGridContent {
    const KIND: SectionKind = SectionKind::FeatureGrid;
}

// ============================================================================
// call-to-action
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallToActionContent {
    pub title: String,
    pub body: String,
    pub button_text: String,
    pub button_link: String,
    pub background_color: String,
    pub text_color: String,
    pub full_width: bool,
}

impl Default for CallToActionContent {
    fn default() -> Self {
        Self {
            title: "Ready to Start Your Project?".to_string(),
            body: String::new(),
            button_text: "Contact Us".to_string(),
            button_link: "/contact".to_string(),
            background_color: "#0a7cff".to_string(),
            text_color: "#ffffff".to_string(),
            full_width: true,
        }
    }
}

impl SectionContent for CallToActionContent {
    const KIND: SectionKind = SectionKind::CallToAction;
}

// ============================================================================
// rich-text
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RichTextContent {
    pub heading: String,
    pub body: String,
    pub max_width: f64,
}

impl Default for RichTextContent {
    fn default() -> Self {
        Self {
            heading: String::new(),
            body: String::new(),
            max_width: 960.0,
        }
    }
}

impl RichTextContent {
    /// Body split into paragraphs on blank lines
    pub fn paragraphs(&self) -> Vec<&str> {
        self.body
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

impl SectionContent for RichTextContent {
    const KIND: SectionKind = SectionKind::RichText;
}

// ============================================================================
// video-banner
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoBannerContent {
    pub title: String,
    pub video_url: String,
    pub poster_image: String,
    pub autoplay: bool,
    #[serde(rename = "loop")]
    pub loop_video: bool,
    pub muted: bool,
    pub height: f64,
}

impl Default for VideoBannerContent {
    fn default() -> Self {
        Self {
            title: String::new(),
            video_url: String::new(),
            poster_image: String::new(),
            autoplay: true,
            loop_video: true,
            muted: true,
            height: 520.0,
        }
    }
}

impl SectionContent for VideoBannerContent {
    const KIND: SectionKind = SectionKind::VideoBanner;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> ContentMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(SectionKind::parse("Hero"), None);
        assert_eq!(SectionKind::parse(""), None);
    }

    #[test]
    fn test_empty_hero_uses_documented_defaults() {
        let hero: HeroContent = decode_lenient(&ContentMap::new());
        assert_eq!(hero.title, "Integrating");
        assert_eq!(hero.subtitle, "Sustainable Infrastructure");
        assert_eq!(hero.alignment, Alignment::Center);
    }

    #[test]
    fn test_bad_field_falls_back_without_losing_others() {
        let content = map(json!({
            "title": "Building",
            "overlayOpacity": "very",
            "alignment": "diagonal"
        }));
        let hero: HeroContent = decode_lenient(&content);

        assert_eq!(hero.title, "Building");
        assert_eq!(hero.overlay_opacity, 0.5);
        assert_eq!(hero.alignment, Alignment::Center);
    }

    #[test]
    fn test_null_field_falls_back() {
        let hero: HeroContent = decode_lenient(&map(json!({ "subtitle": null })));
        assert_eq!(hero.subtitle, "Sustainable Infrastructure");
    }

    #[test]
    fn test_obsolete_fields_are_ignored() {
        let services: ServicesContent =
            decode_lenient(&map(json!({ "headline": "Old name", "heading": "New" })));
        assert_eq!(services.heading, "New");
        assert_eq!(services.services.len(), 3);
    }

    #[test]
    fn test_numeric_item_ids_are_kept() {
        let content = map(json!({
            "services": [
                { "id": 1700000000000u64, "title": "Mine A" },
                { "id": "b", "title": "Mine B" }
            ]
        }));
        let services: ServicesContent = decode_lenient(&content);

        assert_eq!(services.services.len(), 2);
        assert_eq!(services.services[0].id, "1700000000000");
        assert_eq!(services.services[0].title, "Mine A");
        assert_eq!(services.services[1].title, "Mine B");
    }

    #[test]
    fn test_bad_item_field_only_costs_that_field() {
        let content = map(json!({
            "heading": "Numbers",
            "stats": [
                { "id": "a", "value": 42, "label": "Sites", "suffix": null },
                "not an item",
                { "id": "c", "label": ["bad"] }
            ]
        }));
        let stats: StatCardsContent = decode_lenient(&content);

        assert_eq!(stats.heading, "Numbers");
        assert_eq!(stats.stats.len(), 3);
        assert_eq!(stats.stats[0].value, "42");
        assert_eq!(stats.stats[0].label, "Sites");
        assert_eq!(stats.stats[0].suffix, "");
        assert_eq!(stats.stats[1], StatItem::default());
        assert_eq!(stats.stats[2].id, "c");
        assert_eq!(stats.stats[2].label, "");
    }

    #[test]
    fn test_non_array_item_list_falls_back() {
        let services: ServicesContent = decode_lenient(&map(json!({ "services": "none" })));
        assert_eq!(services.services.len(), 3);
    }

    #[test]
    fn test_field_names_follow_wire_casing() {
        let names = SectionKind::Hero.field_names();
        assert!(names.contains(&"overlayOpacity".to_string()));
        assert!(names.contains(&"title".to_string()));

        let names = SectionKind::VideoBanner.field_names();
        assert!(names.contains(&"loop".to_string()));
    }

    #[test]
    fn test_rich_text_paragraphs() {
        let content = RichTextContent {
            body: "First.\n\n  Second.  \n\n\n".to_string(),
            ..Default::default()
        };
        assert_eq!(content.paragraphs(), vec!["First.", "Second."]);
    }
}
