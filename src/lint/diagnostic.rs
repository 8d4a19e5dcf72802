//! Lint diagnostic messages.
//!
//! This module provides the [`LintDiagnostic`] type for representing
//! issues found in a program, located by file and node path.

use std::path::PathBuf;

use super::rule::{RuleId, Severity};
use crate::requirements::NodePath;

/// A diagnostic message produced by a lint rule.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// The rule that produced this diagnostic.
    pub rule_id: RuleId,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Program file the diagnostic belongs to.
    pub file: Option<PathBuf>,
    /// Location of the offending node inside the program.
    pub path: Option<NodePath>,
    /// Optional suggestion for fixing the issue.
    pub suggestion: Option<String>,
}

impl LintDiagnostic {
    /// Create a new diagnostic.
    pub fn new(rule_id: RuleId, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            severity,
            message: message.into(),
            file: None,
            path: None,
            suggestion: None,
        }
    }

    /// Add the node path.
    pub fn with_path(mut self, path: NodePath) -> Self {
        self.path = Some(path);
        self
    }

    /// Add the program file.
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Add a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// `file path` location string, if either part is known.
    pub fn location(&self) -> Option<String> {
        match (&self.file, &self.path) {
            (Some(file), Some(path)) => Some(format!("{} {}", file.display(), path)),
            (Some(file), None) => Some(file.display().to_string()),
            (None, Some(path)) => Some(path.to_string()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_creation() {
        let diag = LintDiagnostic::new(RuleId::new("test-rule"), Severity::Error, "Test message");

        assert_eq!(diag.rule_id, RuleId::new("test-rule"));
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "Test message");
        assert!(diag.suggestion.is_none());
        assert!(diag.path.is_none());
        assert!(diag.location().is_none());
    }

    #[test]
    fn diagnostic_builder_pattern() {
        let diag = LintDiagnostic::new(RuleId::new("test"), Severity::Warning, "Test message")
            .with_path(NodePath::category(0).child("courses", 2))
            .with_file("programs/cs.json")
            .with_suggestion("Fix it like this");

        assert_eq!(diag.suggestion.as_deref(), Some("Fix it like this"));
        assert_eq!(
            diag.location().unwrap(),
            "programs/cs.json requirements[0].courses[2]"
        );
    }

    #[test]
    fn location_with_path_only() {
        let diag = LintDiagnostic::new(RuleId::new("test"), Severity::Hint, "msg")
            .with_path(NodePath::shared("labs"));
        assert_eq!(diag.location().unwrap(), "shared_groups.labs");
    }
}
