//! Rule registry for managing lint rules.
//!
//! The [`RuleRegistry`] stores all available lint rules and provides
//! methods for registering, retrieving, and iterating over them.

use std::collections::BTreeMap;

use super::diagnostic::LintDiagnostic;
use super::rule::{LintRule, RuleId};
use super::rules::{
    CircularGroupRefRule, DuplicateCourseRule, EmptyGroupRule, EmptySelectionRule,
    InvalidSelectionCountRule, MissingCourseCodeRule, ProgramCreditsRule,
    SelectionUnsatisfiableRule, UndefinedGroupRefRule, UnknownNodeKindRule,
};
use crate::requirements::Program;

/// Registry of all available lint rules.
///
/// Rules are kept ordered by id so diagnostics come out in a stable order.
pub struct RuleRegistry {
    rules: BTreeMap<String, Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Create a registry with all built-in rules.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(UnknownNodeKindRule));
        registry.register(Box::new(InvalidSelectionCountRule));
        registry.register(Box::new(EmptySelectionRule));
        registry.register(Box::new(SelectionUnsatisfiableRule));
        registry.register(Box::new(MissingCourseCodeRule));
        registry.register(Box::new(EmptyGroupRule));
        registry.register(Box::new(UndefinedGroupRefRule));
        registry.register(Box::new(CircularGroupRefRule));
        registry.register(Box::new(DuplicateCourseRule));
        registry.register(Box::new(ProgramCreditsRule));
        registry
    }

    /// Register a lint rule.
    pub fn register(&mut self, rule: Box<dyn LintRule>) {
        self.rules.insert(rule.id().0, rule);
    }

    /// Get a rule by ID.
    pub fn get(&self, id: &RuleId) -> Option<&dyn LintRule> {
        self.rules.get(&id.0).map(|r| r.as_ref())
    }

    /// Iterate over all rules.
    pub fn iter(&self) -> impl Iterator<Item = &dyn LintRule> {
        self.rules.values().map(|r| r.as_ref())
    }

    /// Run every rule against a program.
    pub fn check(&self, program: &Program) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();
        for rule in self.iter() {
            diagnostics.extend(rule.check(program));
        }
        tracing::debug!(
            program = %program.name,
            count = diagnostics.len(),
            "Lint finished"
        );
        diagnostics
    }

    /// Get the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::Severity;
    use crate::requirements::{RequirementCategory, RequirementNode};

    struct MockRule {
        id: RuleId,
    }

    impl LintRule for MockRule {
        fn id(&self) -> RuleId {
            self.id.clone()
        }
        fn name(&self) -> &str {
            "Mock Rule"
        }
        fn description(&self) -> &str {
            "A mock rule for testing"
        }
        fn default_severity(&self) -> Severity {
            Severity::Warning
        }
        fn check(&self, _program: &Program) -> Vec<LintDiagnostic> {
            vec![LintDiagnostic::new(
                self.id(),
                self.default_severity(),
                "mock",
            )]
        }
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = RuleRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_register_and_get() {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(MockRule {
            id: RuleId::new("mock"),
        }));

        assert!(!registry.is_empty());
        assert!(registry.get(&RuleId::new("mock")).is_some());
        assert!(registry.get(&RuleId::new("unknown")).is_none());
    }

    #[test]
    fn registry_check_runs_rules_in_id_order() {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(MockRule {
            id: RuleId::new("rule-b"),
        }));
        registry.register(Box::new(MockRule {
            id: RuleId::new("rule-a"),
        }));

        let diagnostics = registry.check(&Program::new("T", 1, vec![]));
        let ids: Vec<String> = diagnostics.iter().map(|d| d.rule_id.0.clone()).collect();
        assert_eq!(ids, vec!["rule-a", "rule-b"]);
    }

    #[test]
    fn registry_default_is_empty() {
        let registry = RuleRegistry::default();
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_with_builtins_has_rules() {
        let registry = RuleRegistry::with_builtins();
        assert_eq!(registry.len(), 10);
        for id in [
            "unknown-node-kind",
            "invalid-selection-count",
            "empty-selection",
            "selection-unsatisfiable",
            "missing-course-code",
            "empty-group",
            "undefined-group-ref",
            "circular-group-ref",
            "duplicate-course",
            "program-credits",
        ] {
            assert!(registry.get(&RuleId::new(id)).is_some(), "missing {}", id);
        }
    }

    #[test]
    fn builtins_pass_a_well_formed_program() {
        let program = Program::new(
            "CS",
            122,
            vec![RequirementCategory::new(
                "Core",
                vec![
                    RequirementNode::course("CS 1331", Some(3)),
                    RequirementNode::select(
                        1,
                        vec![
                            RequirementNode::course("CS 2110", None),
                            RequirementNode::course("CS 2200", None),
                        ],
                    ),
                ],
            )],
        );

        assert!(RuleRegistry::with_builtins().check(&program).is_empty());
    }
}
