use super::{item_template, optional_text, section_root};
use crate::fields::FieldSpec;
use crate::registry::SectionView;
use pagecraft_model::{Section, ServiceItem, ServicesContent};
use pagecraft_render::VNode;

pub struct ServicesView;

impl SectionView for ServicesView {
    type Content = ServicesContent;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("heading", "Heading"),
            FieldSpec::textarea("intro", "Introduction"),
            FieldSpec::color("backgroundColor", "Background colour"),
            FieldSpec::repeatable(
                "services",
                "Service",
                vec![
                    FieldSpec::text("title", "Title"),
                    FieldSpec::textarea("description", "Description"),
                    FieldSpec::text("icon", "Icon"),
                    FieldSpec::text("link", "Link"),
                ],
                item_template(&[
                    ("title", "New Service"),
                    ("description", ""),
                    ("icon", ""),
                    ("link", ""),
                ]),
            ),
        ]
    }

    fn view(section: &Section, content: &ServicesContent) -> VNode {
        let columns = content.services.len().clamp(1, 3);

        section_root(section, "pc-services")
            .with_style("background-color", content.background_color.as_str())
            .with_children(optional_text("h2", "pc-services__heading", &content.heading))
            .with_children(optional_text("p", "pc-services__intro", &content.intro))
            .with_child(
                VNode::element("div")
                    .with_class("pc-grid")
                    .with_style("grid-template-columns", format!("repeat({}, 1fr)", columns))
                    .with_children(content.services.iter().map(service_card)),
            )
    }
}

fn service_card(service: &ServiceItem) -> VNode {
    let mut card = VNode::element("article")
        .with_class("pc-card")
        .with_class("pc-service")
        .with_attr("data-item-id", service.id.as_str());

    if !service.icon.is_empty() {
        card = card.with_child(
            VNode::element("span")
                .with_class("pc-service__icon")
                .with_attr("data-icon", service.icon.as_str()),
        );
    }

    let title = VNode::text_element("h3", service.title.as_str());
    let title = if service.link.is_empty() {
        title
    } else {
        VNode::element("a")
            .with_attr("href", service.link.as_str())
            .with_child(title)
    };

    card.with_child(title)
        .with_children(optional_text("p", "pc-service__description", &service.description))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::ControlInput;
    use crate::registry::{ContentUpdate, Registry};
    use pagecraft_model::ContentMap;
    use serde_json::{json, Value};

    fn stored_services() -> Section {
        let content = crate::registry::patch([(
            "services",
            json!([
                { "id": 1700000000000u64, "title": "Mine A" },
                { "id": "b", "title": "Mine B", "icon": null }
            ]),
        )]);
        Section::with_content("services-1", "home-services", content)
    }

    #[test]
    fn test_default_services_render_three_cards() {
        let section = Section::with_content("services-1", "home-services", ContentMap::new());
        let node = ServicesView::view(&section, &section.decode());

        let cards = node.find_all(&|n| n.has_class("pc-service"));
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].attr("data-item-id"), Some("service-1"));
    }

    #[test]
    fn test_add_service_grows_by_one_with_unique_id() {
        let registry = Registry::new();
        let section = Section::with_content("services-1", "home-services", ContentMap::new());

        let update = registry
            .apply_input(&section, ControlInput::AddItem { field: "services".to_string() })
            .unwrap();

        let ContentUpdate::Merge(patch) = update else {
            panic!("expected merge");
        };
        let services = patch["services"].as_array().unwrap();
        assert_eq!(services.len(), 4);

        let ids: Vec<&str> = services.iter().filter_map(|s| s["id"].as_str()).collect();
        assert_eq!(&ids[..3], &["service-1", "service-2", "service-3"]);
        assert!(!ids[..3].contains(&ids[3]));
        assert_eq!(services[3]["title"], Value::from("New Service"));
    }

    #[test]
    fn test_remove_service_keeps_other_ids() {
        let registry = Registry::new();
        let section = Section::with_content("services-1", "home-services", ContentMap::new());

        let update = registry
            .apply_input(
                &section,
                ControlInput::RemoveItem { field: "services".to_string(), index: 1 },
            )
            .unwrap();

        let ContentUpdate::Merge(patch) = update else {
            panic!("expected merge");
        };
        let ids: Vec<&str> = patch["services"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|s| s["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["service-1", "service-3"]);
    }

    #[test]
    fn test_stored_services_with_numeric_ids_render() {
        let section = stored_services();
        let node = Registry::new().render(&section, &crate::registry::RenderContext::viewing());

        let cards = node.find_all(&|n| n.has_class("pc-service"));
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].attr("data-item-id"), Some("1700000000000"));
        assert!(node.text_content().contains("Mine A"));
        assert!(!node.text_content().contains("Civil Engineering"));
    }

    #[test]
    fn test_edit_stored_service_keeps_stored_items() {
        let update = Registry::new()
            .apply_input(
                &stored_services(),
                ControlInput::SetItemField {
                    field: "services".to_string(),
                    index: 0,
                    key: "title".to_string(),
                    value: json!("Edited"),
                },
            )
            .unwrap();

        let ContentUpdate::Merge(patch) = update else {
            panic!("expected merge");
        };
        assert_eq!(
            patch["services"],
            json!([
                { "id": 1700000000000u64, "title": "Edited" },
                { "id": "b", "title": "Mine B", "icon": null }
            ])
        );
    }
}
