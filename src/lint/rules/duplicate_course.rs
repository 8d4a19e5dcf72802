//! Duplicate course detection.
//!
//! Listing a course twice in one category usually means an option list was
//! pasted into the wrong group. A completed course satisfies every leaf that
//! names it, so duplicates inflate progress.

use std::collections::HashMap;

use crate::lint::{LintDiagnostic, LintRule, RuleId, Severity};
use crate::requirements::{NodeKind, NodePath, Program, RequirementNode};

/// Detects course codes listed more than once in the same category.
pub struct DuplicateCourseRule;

impl LintRule for DuplicateCourseRule {
    fn id(&self) -> RuleId {
        RuleId::new("duplicate-course")
    }

    fn name(&self) -> &str {
        "Duplicate Course"
    }

    fn description(&self) -> &str {
        "Detects the same course code listed more than once in a category"
    }

    fn default_severity(&self) -> Severity {
        Severity::Hint
    }

    fn check(&self, program: &Program) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        for (ci, category) in program.requirements.iter().enumerate() {
            let mut seen: HashMap<String, NodePath> = HashMap::new();
            let base = NodePath::category(ci);
            for (ni, node) in category.courses.iter().enumerate() {
                visit(&base.child("courses", ni), node, &mut |path, code| {
                    match seen.get(code) {
                        Some(first) => diagnostics.push(
                            LintDiagnostic::new(
                                self.id(),
                                self.default_severity(),
                                format!(
                                    "'{}' is listed more than once in category '{}'",
                                    code, category.name
                                ),
                            )
                            .with_path(path.clone())
                            .with_suggestion(format!("First listed at {}", first)),
                        ),
                        None => {
                            seen.insert(code.to_string(), path.clone());
                        }
                    }
                });
            }
        }

        diagnostics
    }
}

fn visit(path: &NodePath, node: &RequirementNode, found: &mut dyn FnMut(&NodePath, &str)) {
    if let NodeKind::Regular(course) = &node.kind {
        if let Some(code) = &course.code {
            found(path, code);
        }
    }
    let field = match node.kind {
        NodeKind::Selection { .. } => "options",
        _ => "courses",
    };
    for (i, child) in node.children().iter().enumerate() {
        visit(&path.child(field, i), child, found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::RequirementCategory;

    #[test]
    fn detects_duplicate_within_category() {
        let program = Program::new(
            "Test",
            120,
            vec![RequirementCategory::new(
                "Core",
                vec![
                    RequirementNode::course("CS 1331", None),
                    RequirementNode::any_of(vec![
                        RequirementNode::course("CS 1332", None),
                        RequirementNode::course("CS 1331", None),
                    ]),
                ],
            )],
        );

        let diagnostics = DuplicateCourseRule.check(&program);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Hint);
        assert_eq!(
            diagnostics[0].path.as_ref().unwrap().as_str(),
            "requirements[0].courses[1].courses[1]"
        );
        assert_eq!(
            diagnostics[0].suggestion.as_deref(),
            Some("First listed at requirements[0].courses[0]")
        );
    }

    #[test]
    fn same_course_in_different_categories_is_fine() {
        let program = Program::new(
            "Test",
            120,
            vec![
                RequirementCategory::new("Core", vec![RequirementNode::course("MATH 1551", None)]),
                RequirementCategory::new(
                    "Electives",
                    vec![RequirementNode::course("MATH 1551", None)],
                ),
            ],
        );

        assert!(DuplicateCourseRule.check(&program).is_empty());
    }
}
