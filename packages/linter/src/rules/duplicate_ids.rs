use crate::diagnostic::{Diagnostic, Location};
use crate::rules::LintRule;
use pagecraft_model::Section;
use serde_json::Value;
use std::collections::HashSet;

/// Section ids must be unique within a page
pub struct DuplicateSectionIdRule;

impl LintRule for DuplicateSectionIdRule {
    fn name(&self) -> &'static str {
        "duplicate-section-id"
    }

    fn description(&self) -> &'static str {
        "Section ids must be present and unique within a page"
    }

    fn check_sections(&self, sections: &[Section]) -> Vec<Diagnostic> {
        let mut seen = HashSet::new();
        let mut diagnostics = Vec::new();

        for (index, section) in sections.iter().enumerate() {
            if section.id.trim().is_empty() {
                diagnostics.push(Diagnostic::error(
                    self.name(),
                    format!("Section at position {} has no id", index),
                    Location::layout(),
                ));
            } else if !seen.insert(section.id.as_str()) {
                diagnostics.push(
                    Diagnostic::error(
                        self.name(),
                        format!("Section id '{}' is used more than once", section.id),
                        Location::section(section.id.as_str()),
                    )
                    .with_suggestion("Give each section its own id; edits target sections by id"),
                );
            }
        }

        diagnostics
    }
}

/// Items of repeatable fields need stable, unique ids
pub struct DuplicateItemIdRule;

impl LintRule for DuplicateItemIdRule {
    fn name(&self) -> &'static str {
        "duplicate-item-id"
    }

    fn description(&self) -> &'static str {
        "Items of list fields must carry unique ids"
    }

    fn check_section(&self, section: &Section) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for (field, value) in &section.content {
            let Some(items) = value.as_array() else {
                continue;
            };
            if !items.iter().all(Value::is_object) {
                continue;
            }

            let mut seen = HashSet::new();
            for (index, item) in items.iter().enumerate() {
                let location = Location::field(section.id.as_str(), format!("{}[{}]", field, index));
                let id = match item.get("id") {
                    Some(Value::String(id)) => Some(id.clone()),
                    Some(Value::Number(id)) => Some(id.to_string()),
                    _ => None,
                };
                match id.as_deref() {
                    None | Some("") => diagnostics.push(
                        Diagnostic::warning(
                            self.name(),
                            format!("Item {} of '{}' has no id", index, field),
                            location,
                        )
                        .with_suggestion("Re-add the item in the editor to assign an id"),
                    ),
                    Some(id) if !seen.insert(id.to_string()) => diagnostics.push(Diagnostic::error(
                        self.name(),
                        format!("Item id '{}' appears more than once in '{}'", id, field),
                        location,
                    )),
                    Some(_) => {}
                }
            }
        }

        diagnostics
    }
}
