use crate::diagnostic::{Diagnostic, DiagnosticLevel};
use crate::rules::RuleRegistry;
use pagecraft_model::{Layout, Section};

/// Options for configuring the linter
#[derive(Debug, Default)]
pub struct LintOptions {
    /// Custom rule registry (uses default if None)
    pub registry: Option<RuleRegistry>,

    /// Also lint every stored version snapshot
    pub include_versions: bool,
}

/// Lint a page's sections and return diagnostics
pub fn lint_sections(sections: &[Section], registry: &RuleRegistry) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for rule in registry.rules() {
        diagnostics.extend(rule.check_sections(sections));
    }

    for section in sections {
        for rule in registry.rules() {
            diagnostics.extend(rule.check_section(section));
        }
    }

    diagnostics
}

/// Lint the working sections of a layout (newest draft, or published)
pub fn lint_layout(layout: &Layout, options: LintOptions) -> Vec<Diagnostic> {
    let registry = options.registry.unwrap_or_default();
    let mut diagnostics = lint_sections(&layout.working_sections(), &registry);

    if options.include_versions {
        for version in &layout.versions {
            for mut diagnostic in lint_sections(&version.sections, &registry) {
                diagnostic.message = format!("[{}] {}", version.version_id, diagnostic.message);
                diagnostics.push(diagnostic);
            }
        }
    }

    diagnostics
}

/// Whether any diagnostic is an error
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics
        .iter()
        .any(|diagnostic| diagnostic.level == DiagnosticLevel::Error)
}
