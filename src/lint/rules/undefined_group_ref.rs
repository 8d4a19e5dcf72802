//! Undefined shared group detection.

use crate::lint::{LintDiagnostic, LintRule, RuleId, Severity};
use crate::requirements::{NodeKind, Program};

/// Detects references to shared groups that do not exist.
pub struct UndefinedGroupRefRule;

impl LintRule for UndefinedGroupRefRule {
    fn id(&self) -> RuleId {
        RuleId::new("undefined-group-ref")
    }

    fn name(&self) -> &str {
        "Undefined Group Reference"
    }

    fn description(&self) -> &str {
        "Detects group_ref nodes pointing at a shared group that is not defined"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, program: &Program) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        program.walk(&mut |path, node| {
            let NodeKind::Reference { name } = &node.kind else {
                return;
            };
            if program.shared_group(name).is_some() {
                return;
            }
            let mut diag = LintDiagnostic::new(
                self.id(),
                self.default_severity(),
                format!("Shared group '{}' is not defined", name),
            )
            .with_path(path.clone());
            if !program.shared_groups.is_empty() {
                let known: Vec<&str> = program.shared_groups.keys().map(String::as_str).collect();
                diag = diag.with_suggestion(format!("Defined groups: {}", known.join(", ")));
            }
            diagnostics.push(diag);
        });

        diagnostics
    }
}
