mod duplicate_ids;
mod invalid_values;
mod unknown_section_type;
mod unrecognized_field;

pub use duplicate_ids::{DuplicateItemIdRule, DuplicateSectionIdRule};
pub use invalid_values::{InvalidColorRule, InvalidLinkRule};
pub use unknown_section_type::UnknownSectionTypeRule;
pub use unrecognized_field::UnrecognizedFieldRule;

use crate::diagnostic::Diagnostic;
use pagecraft_model::Section;

/// Trait for implementing lint rules
pub trait LintRule {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check the page's section list as a whole
    fn check_sections(&self, _sections: &[Section]) -> Vec<Diagnostic> {
        Vec::new()
    }

    /// Check one section
    fn check_section(&self, _section: &Section) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Registry of all available lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(DuplicateSectionIdRule),
                Box::new(DuplicateItemIdRule),
                Box::new(UnknownSectionTypeRule),
                Box::new(UnrecognizedFieldRule),
                Box::new(InvalidColorRule),
                Box::new(InvalidLinkRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    /// Drop a rule by name
    pub fn disable(&mut self, name: &str) {
        self.rules.retain(|rule| rule.name() != name);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
