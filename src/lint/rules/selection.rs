//! Selection group validation.

use crate::lint::{LintDiagnostic, LintRule, RuleId, Severity};
use crate::requirements::{NodeKind, Program};

/// Detects selections that require fewer than one option.
pub struct InvalidSelectionCountRule;

impl LintRule for InvalidSelectionCountRule {
    fn id(&self) -> RuleId {
        RuleId::new("invalid-selection-count")
    }

    fn name(&self) -> &str {
        "Invalid Selection Count"
    }

    fn description(&self) -> &str {
        "Detects selection groups whose selectionCount is missing or below 1"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, program: &Program) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        program.walk(&mut |path, node| {
            if let NodeKind::Selection {
                selection_count, ..
            } = &node.kind
            {
                if *selection_count < 1 {
                    diagnostics.push(
                        LintDiagnostic::new(
                            self.id(),
                            self.default_severity(),
                            format!(
                                "Selection count {} is below 1; the group can never be satisfied",
                                selection_count
                            ),
                        )
                        .with_path(path.clone())
                        .with_suggestion("Set selectionCount to the number of options required"),
                    );
                }
            }
        });

        diagnostics
    }
}

/// Detects selections with no options.
pub struct EmptySelectionRule;

impl LintRule for EmptySelectionRule {
    fn id(&self) -> RuleId {
        RuleId::new("empty-selection")
    }

    fn name(&self) -> &str {
        "Empty Selection"
    }

    fn description(&self) -> &str {
        "Detects selection groups with no options"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, program: &Program) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        program.walk(&mut |path, node| {
            if let NodeKind::Selection { options, .. } = &node.kind {
                if options.is_empty() {
                    diagnostics.push(
                        LintDiagnostic::new(
                            self.id(),
                            self.default_severity(),
                            "Selection has no options",
                        )
                        .with_path(path.clone()),
                    );
                }
            }
        });

        diagnostics
    }
}

/// Detects selections that require more options than they list.
pub struct SelectionUnsatisfiableRule;

impl LintRule for SelectionUnsatisfiableRule {
    fn id(&self) -> RuleId {
        RuleId::new("selection-unsatisfiable")
    }

    fn name(&self) -> &str {
        "Selection Unsatisfiable"
    }

    fn description(&self) -> &str {
        "Detects selection groups that require more options than they offer"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, program: &Program) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        program.walk(&mut |path, node| {
            if let NodeKind::Selection {
                selection_count,
                options,
            } = &node.kind
            {
                // Empty selections are reported by empty-selection.
                if !options.is_empty() && *selection_count > options.len() as i64 {
                    diagnostics.push(
                        LintDiagnostic::new(
                            self.id(),
                            self.default_severity(),
                            format!(
                                "Selection requires {} of only {} option(s)",
                                selection_count,
                                options.len()
                            ),
                        )
                        .with_path(path.clone()),
                    );
                }
            }
        });

        diagnostics
    }
}
