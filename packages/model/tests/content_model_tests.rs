//! Content model behaviour across sections, items and layouts

use pagecraft_model::{
    HeroContent, Layout, RepeatableItems, Section, SectionContent, SectionKind, ServicesContent,
};
use serde_json::{json, Value};

fn content(value: Value) -> pagecraft_model::ContentMap {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

#[test]
fn test_edit_preserves_unknown_fields() {
    let mut section = Section::with_content(
        "hero-1",
        "hero",
        content(json!({ "title": "Hello", "legacyBadge": "2019" })),
    );

    section.merge_content(content(json!({ "title": "World" })));

    let hero: HeroContent = section.decode();
    assert_eq!(hero.title, "World");
    assert_eq!(section.content["legacyBadge"], json!("2019"));
}

#[test]
fn test_services_item_lifecycle() {
    let section = Section::new(SectionKind::HomeServices, |_| false);
    let services: ServicesContent = section.decode();
    let before: Vec<String> = services.services.iter().map(|s| s.id.clone()).collect();

    let effective = services.to_content();
    let mut items = RepeatableItems::from_value("services", effective.get("services")).unwrap();
    let new_id = items.push(content(json!({ "title": "New Service" })));
    items.remove(0).unwrap();

    let mut updated = section.clone();
    updated.merge_content(items.into_patch());
    let services: ServicesContent = updated.decode();

    let after: Vec<String> = services.services.iter().map(|s| s.id.clone()).collect();
    assert_eq!(after, vec![before[1].clone(), before[2].clone(), new_id]);
}

#[test]
fn test_layout_round_trips_through_json() {
    let mut layout = Layout::new("layout-home", "home", "Home");
    layout.record_save(
        vec![Section::new(SectionKind::Hero, |_| false)],
        false,
        None,
        "admin",
    );

    let text = serde_json::to_string_pretty(&layout).unwrap();
    let parsed: Layout = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, layout);
}
