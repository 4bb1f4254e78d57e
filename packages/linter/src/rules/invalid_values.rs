use crate::diagnostic::{Diagnostic, Location};
use crate::rules::LintRule;
use pagecraft_model::Section;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn color_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").ok())
        .as_ref()
}

fn link_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^(/|#|https?://|mailto:|tel:)").ok())
        .as_ref()
}

/// Every string value in the content, top level and one level into list
/// items, with its display path and key
fn string_fields(section: &Section) -> Vec<(String, &str, &str)> {
    let mut found = Vec::new();
    for (field, value) in &section.content {
        match value {
            Value::String(s) => found.push((field.clone(), field.as_str(), s.as_str())),
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let Some(object) = item.as_object() else {
                        continue;
                    };
                    for (key, value) in object {
                        if let Value::String(s) = value {
                            found.push((format!("{}[{}].{}", field, index, key), key.as_str(), s.as_str()));
                        }
                    }
                }
            }
            _ => {}
        }
    }
    found
}

/// Colour fields must hold `#rgb` or `#rrggbb`
pub struct InvalidColorRule;

impl LintRule for InvalidColorRule {
    fn name(&self) -> &'static str {
        "invalid-color"
    }

    fn description(&self) -> &'static str {
        "Colour fields must be #rgb or #rrggbb hex values"
    }

    fn check_section(&self, section: &Section) -> Vec<Diagnostic> {
        let Some(pattern) = color_pattern() else {
            return Vec::new();
        };

        string_fields(section)
            .into_iter()
            .filter(|(_, key, value)| {
                key.to_ascii_lowercase().ends_with("color") && !pattern.is_match(value)
            })
            .map(|(path, _, value)| {
                Diagnostic::warning(
                    self.name(),
                    format!("'{}' is not a hex colour", value),
                    Location::field(section.id.as_str(), path),
                )
                .with_suggestion("Use a value like #0a7cff")
            })
            .collect()
    }
}

/// Link fields must be site-relative or carry a scheme
pub struct InvalidLinkRule;

impl LintRule for InvalidLinkRule {
    fn name(&self) -> &'static str {
        "invalid-link"
    }

    fn description(&self) -> &'static str {
        "Links must start with /, #, http(s)://, mailto: or tel:"
    }

    fn check_section(&self, section: &Section) -> Vec<Diagnostic> {
        let Some(pattern) = link_pattern() else {
            return Vec::new();
        };

        string_fields(section)
            .into_iter()
            .filter(|(_, key, value)| {
                (*key == "link" || key.ends_with("Link"))
                    && !value.is_empty()
                    && !pattern.is_match(value)
            })
            .map(|(path, _, value)| {
                Diagnostic::warning(
                    self.name(),
                    format!("Link '{}' is neither site-relative nor absolute", value),
                    Location::field(section.id.as_str(), path),
                )
                .with_suggestion(format!("Did you mean '/{}'?", value.trim_start_matches('/')))
            })
            .collect()
    }
}
