//! Node shape validation.
//!
//! These rules catch leaves and node kinds the evaluator cannot match
//! against a completion set.

use crate::lint::{LintDiagnostic, LintRule, RuleId, Severity};
use crate::requirements::{NodeKind, Program};

/// Detects `courseType` values this version does not understand.
pub struct UnknownNodeKindRule;

impl LintRule for UnknownNodeKindRule {
    fn id(&self) -> RuleId {
        RuleId::new("unknown-node-kind")
    }

    fn name(&self) -> &str {
        "Unknown Node Kind"
    }

    fn description(&self) -> &str {
        "Detects requirement nodes with an unrecognised courseType"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, program: &Program) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        program.walk(&mut |path, node| {
            let NodeKind::Unknown { kind } = &node.kind else {
                return;
            };
            // A group_ref without a target is parsed as unknown.
            let diag = if kind == "group_ref" {
                LintDiagnostic::new(
                    self.id(),
                    self.default_severity(),
                    "Group reference has no 'ref' target",
                )
                .with_suggestion("Add \"ref\": \"<shared group name>\"")
            } else {
                LintDiagnostic::new(
                    self.id(),
                    self.default_severity(),
                    format!("Unknown requirement type '{}'", kind),
                )
                .with_suggestion(
                    "Use one of: regular, flexible, and_group, or_group, selection, group_ref",
                )
            };
            diagnostics.push(diag.with_path(path.clone()));
        });

        diagnostics
    }
}

/// Detects leaves with nothing to match against the completion set.
pub struct MissingCourseCodeRule;

impl LintRule for MissingCourseCodeRule {
    fn id(&self) -> RuleId {
        RuleId::new("missing-course-code")
    }

    fn name(&self) -> &str {
        "Missing Course Code"
    }

    fn description(&self) -> &str {
        "Detects courses without a code and flexible requirements without code or text"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, program: &Program) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        program.walk(&mut |path, node| {
            if !node.is_leaf() || node.completion_key().is_some() {
                return;
            }
            let message = match &node.kind {
                NodeKind::Flexible(_) => "Flexible requirement has neither code nor text",
                _ => "Course has no code",
            };
            diagnostics.push(
                LintDiagnostic::new(self.id(), self.default_severity(), message)
                    .with_path(path.clone()),
            );
        });

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::{RequirementCategory, RequirementNode};

    fn program_with(nodes: Vec<RequirementNode>) -> Program {
        Program::new("Test", 120, vec![RequirementCategory::new("Core", nodes)])
    }

    #[test]
    fn detects_unknown_kind() {
        let program = program_with(vec![
            RequirementNode::course("CS 1331", None),
            RequirementNode::new(NodeKind::Unknown {
                kind: "lab_block".to_string(),
            }),
        ]);

        let diagnostics = UnknownNodeKindRule.check(&program);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("lab_block"));
        assert_eq!(
            diagnostics[0].path.as_ref().unwrap().as_str(),
            "requirements[0].courses[1]"
        );
    }

    #[test]
    fn group_ref_without_target_gets_specific_message() {
        let program: Program = serde_json::from_str(
            r#"{"name":"T","requirements":[{"name":"C","courses":[{"courseType":"group_ref"}]}]}"#,
        )
        .unwrap();

        let diagnostics = UnknownNodeKindRule.check(&program);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("'ref'"));
    }

    #[test]
    fn detects_missing_codes() {
        let program: Program = serde_json::from_str(
            r#"{"name":"T","requirements":[{"name":"C","courses":[
                {"courseType":"regular","title":"Mystery"},
                {"courseType":"flexible"},
                {"courseType":"flexible","text":"Free elective"},
                {"courseType":"regular","code":"CS 1331"}
            ]}]}"#,
        )
        .unwrap();

        let diagnostics = MissingCourseCodeRule.check(&program);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message, "Course has no code");
        assert!(diagnostics[1].message.contains("neither code nor text"));
    }

    #[test]
    fn well_formed_program_is_clean() {
        let program = program_with(vec![RequirementNode::any_of(vec![
            RequirementNode::course("A", None),
            RequirementNode::flexible_text("Any lab science"),
        ])]);

        assert!(UnknownNodeKindRule.check(&program).is_empty());
        assert!(MissingCourseCodeRule.check(&program).is_empty());
    }
}
