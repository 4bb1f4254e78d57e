use crate::diagnostic::{Diagnostic, Location};
use crate::rules::LintRule;
use pagecraft_model::Section;

/// Content fields the section's component does not read.
///
/// Such fields are kept in storage so nothing is lost; this rule only makes
/// them visible.
pub struct UnrecognizedFieldRule;

impl LintRule for UnrecognizedFieldRule {
    fn name(&self) -> &'static str {
        "unrecognized-field"
    }

    fn description(&self) -> &'static str {
        "Stored content fields not used by the section's component"
    }

    fn check_section(&self, section: &Section) -> Vec<Diagnostic> {
        let Some(kind) = section.kind() else {
            return Vec::new();
        };
        let known = kind.field_names();

        section
            .content
            .keys()
            .filter(|key| !known.contains(key))
            .map(|key| {
                Diagnostic::info(
                    self.name(),
                    format!("Field '{}' is not used by {} sections", key, kind.as_str()),
                    Location::field(section.id.as_str(), key.as_str()),
                )
                .with_suggestion(format!(
                    "Remove '{}' if it was left behind by an older version of the component",
                    key
                ))
            })
            .collect()
    }
}
