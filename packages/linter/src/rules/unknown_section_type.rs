use crate::diagnostic::{Diagnostic, Location};
use crate::rules::LintRule;
use pagecraft_model::{Section, SectionKind};

/// Reports sections that will fall back to the generic JSON editor
pub struct UnknownSectionTypeRule;

impl LintRule for UnknownSectionTypeRule {
    fn name(&self) -> &'static str {
        "unknown-section-type"
    }

    fn description(&self) -> &'static str {
        "Section types without a dedicated component"
    }

    fn check_section(&self, section: &Section) -> Vec<Diagnostic> {
        if section.kind().is_some() {
            return Vec::new();
        }

        let known = SectionKind::ALL
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        vec![Diagnostic::info(
            self.name(),
            format!(
                "Section type '{}' has no dedicated component and is edited as raw JSON",
                section.section_type
            ),
            Location::section(section.id.as_str()),
        )
        .with_suggestion(format!("Known types: {}", known))]
    }
}
