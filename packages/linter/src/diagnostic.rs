use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DiagnosticLevel::Error => "error",
            DiagnosticLevel::Warning => "warning",
            DiagnosticLevel::Info => "info",
        };
        f.write_str(label)
    }
}

/// Where in a layout a diagnostic points
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl Location {
    /// The layout as a whole
    pub fn layout() -> Self {
        Self::default()
    }

    pub fn section(section_id: impl Into<String>) -> Self {
        Self {
            section_id: Some(section_id.into()),
            field: None,
        }
    }

    pub fn field(section_id: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            section_id: Some(section_id.into()),
            field: Some(field.into()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.section_id, &self.field) {
            (Some(section), Some(field)) => write!(f, "{}.{}", section, field),
            (Some(section), None) => write!(f, "{}", section),
            _ => f.write_str("<layout>"),
        }
    }
}

/// A diagnostic message from the linter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level
    pub level: DiagnosticLevel,

    /// The rule that generated this diagnostic
    pub rule: String,

    /// Human-readable message
    pub message: String,

    /// Section and field the issue was found in
    pub location: Location,

    /// Optional suggestion for fixing the issue
    pub suggestion: Option<String>,
}

impl Diagnostic {
    fn new(
        level: DiagnosticLevel,
        rule: impl Into<String>,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            level,
            rule: rule.into(),
            message: message.into(),
            location,
            suggestion: None,
        }
    }

    pub fn error(rule: impl Into<String>, message: impl Into<String>, location: Location) -> Self {
        Self::new(DiagnosticLevel::Error, rule, message, location)
    }

    pub fn warning(rule: impl Into<String>, message: impl Into<String>, location: Location) -> Self {
        Self::new(DiagnosticLevel::Warning, rule, message, location)
    }

    pub fn info(rule: impl Into<String>, message: impl Into<String>, location: Location) -> Self {
        Self::new(DiagnosticLevel::Info, rule, message, location)
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}
