//! Program credit total check.

use crate::lint::{LintDiagnostic, LintRule, RuleId, Severity};
use crate::requirements::Program;

/// Detects programs without a credit total.
pub struct ProgramCreditsRule;

impl LintRule for ProgramCreditsRule {
    fn id(&self) -> RuleId {
        RuleId::new("program-credits")
    }

    fn name(&self) -> &str {
        "Program Credits"
    }

    fn description(&self) -> &str {
        "Detects programs whose total_credits is missing or zero"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, program: &Program) -> Vec<LintDiagnostic> {
        if program.total_credits > 0 {
            return vec![];
        }
        vec![LintDiagnostic::new(
            self.id(),
            self.default_severity(),
            format!("Program '{}' has no credit total", program.name),
        )
        .with_suggestion("Set total_credits to the published credit requirement")]
    }
}
