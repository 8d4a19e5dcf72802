//! Empty group detection.
//!
//! An empty AND-group is vacuously satisfied and an empty OR-group can never
//! be; both are almost always data entry mistakes.

use crate::lint::{LintDiagnostic, LintRule, RuleId, Severity};
use crate::requirements::{NodeKind, Program};

/// Detects AND/OR groups with no children.
pub struct EmptyGroupRule;

impl LintRule for EmptyGroupRule {
    fn id(&self) -> RuleId {
        RuleId::new("empty-group")
    }

    fn name(&self) -> &str {
        "Empty Group"
    }

    fn description(&self) -> &str {
        "Detects and_group and or_group nodes with no children"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, program: &Program) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        program.walk(&mut |path, node| {
            let effect = match &node.kind {
                NodeKind::AndGroup { children } if children.is_empty() => "always satisfied",
                NodeKind::OrGroup { children } if children.is_empty() => "never satisfied",
                _ => return,
            };
            diagnostics.push(
                LintDiagnostic::new(
                    self.id(),
                    self.default_severity(),
                    format!("Empty {} is {}", node.kind_name(), effect),
                )
                .with_path(path.clone()),
            );
        });

        diagnostics
    }
}
