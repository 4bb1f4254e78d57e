//! # Pagecraft Linter
//!
//! Static checks over stored layouts. Rules never modify content; they
//! report sections and fields that will render with fallbacks, lose edits,
//! or point nowhere.

mod diagnostic;
mod linter;
mod rules;

pub use diagnostic::{Diagnostic, DiagnosticLevel, Location};
pub use linter::{has_errors, lint_layout, lint_sections, LintOptions};
pub use rules::{
    DuplicateItemIdRule, DuplicateSectionIdRule, InvalidColorRule, InvalidLinkRule, LintRule,
    RuleRegistry, UnknownSectionTypeRule, UnrecognizedFieldRule,
};
