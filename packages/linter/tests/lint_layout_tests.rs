//! Linting whole layouts

use pagecraft_linter::{
    has_errors, lint_layout, DiagnosticLevel, LintOptions, LintRule, RuleRegistry,
};
use pagecraft_model::{ContentMap, Layout, Section, SectionKind};
use serde_json::{json, Value};

fn content(value: Value) -> ContentMap {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

fn clean_layout() -> Layout {
    let mut layout = Layout::new("layout-home", "home", "Home");
    let hero = Section::new(SectionKind::Hero, |_| false);
    let services = Section::new(SectionKind::HomeServices, |id| id == hero.id);
    layout.record_save(vec![hero, services], false, None, "seed");
    layout
}

#[test]
fn test_default_sections_are_clean() {
    let diagnostics = lint_layout(&clean_layout(), LintOptions::default());
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn test_reports_problems_across_rules() {
    let mut layout = Layout::new("l", "about", "About");
    layout.record_save(
        vec![
            Section::with_content("a", "hero", content(json!({ "textColor": "white" }))),
            Section::with_content("a", "carousel", ContentMap::new()),
        ],
        false,
        None,
        "seed",
    );

    let diagnostics = lint_layout(&layout, LintOptions::default());
    let rules: Vec<&str> = diagnostics.iter().map(|d| d.rule.as_str()).collect();

    assert!(rules.contains(&"duplicate-section-id"));
    assert!(rules.contains(&"unknown-section-type"));
    assert!(rules.contains(&"invalid-color"));
    assert!(has_errors(&diagnostics));
}

#[test]
fn test_draft_is_linted_instead_of_published() {
    let mut layout = clean_layout();
    let mut draft = layout.sections.clone();
    draft[0].content.insert("oldField".to_string(), json!(true));
    layout.record_save(draft, true, None, "editor");

    let diagnostics = lint_layout(&layout, LintOptions::default());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, "unrecognized-field");
    assert_eq!(diagnostics[0].level, DiagnosticLevel::Info);
    assert!(!has_errors(&diagnostics));
}

#[test]
fn test_include_versions_prefixes_messages() {
    let mut layout = Layout::new("l", "about", "About");
    layout.record_save(
        vec![Section::with_content("x", "carousel", ContentMap::new())],
        false,
        None,
        "seed",
    );

    let options = LintOptions {
        include_versions: true,
        ..Default::default()
    };
    let diagnostics = lint_layout(&layout, options);

    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics[1].message.starts_with("[v1] "));
}

#[test]
fn test_custom_registry() {
    struct NoHiddenSections;

    impl LintRule for NoHiddenSections {
        fn name(&self) -> &'static str {
            "no-hidden-sections"
        }

        fn description(&self) -> &'static str {
            "Hidden sections should be removed before launch"
        }

        fn check_section(&self, section: &Section) -> Vec<pagecraft_linter::Diagnostic> {
            if section.hidden {
                vec![pagecraft_linter::Diagnostic::warning(
                    self.name(),
                    "Section is hidden",
                    pagecraft_linter::Location::section(section.id.as_str()),
                )]
            } else {
                Vec::new()
            }
        }
    }

    let mut layout = clean_layout();
    layout.sections[1].hidden = true;

    let mut registry = RuleRegistry::empty();
    registry.add_rule(Box::new(NoHiddenSections));
    let diagnostics = lint_layout(
        &layout,
        LintOptions {
            registry: Some(registry),
            include_versions: false,
        },
    );

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, "no-hidden-sections");
}
