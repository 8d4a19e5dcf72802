//! Requirement satisfaction.
//!
//! The [`Evaluator`] decides whether a node of a requirement tree is
//! satisfied by a [`CompletionSource`]. It is the single implementation used
//! by every view: status tables, the tree renderer, exports.
//!
//! # Failure semantics
//!
//! Malformed nodes (unknown kinds, selection counts below one, empty
//! selections, leaves with nothing to match on, references to missing shared
//! groups) evaluate to `false` and are recorded as [`Anomaly`] values, which
//! are also logged at `warn` level. A shared-group reference cycle is the only
//! condition surfaced as an error.
//!
//! # Example
//!
//! ```
//! use degreeplan::requirements::{CompletionState, Evaluator, RequirementNode};
//!
//! let node = RequirementNode::select(
//!     2,
//!     vec![
//!         RequirementNode::course("A", None),
//!         RequirementNode::course("B", None),
//!         RequirementNode::course("C", None),
//!     ],
//! );
//! let state = CompletionState::with_completed(["A", "C"]);
//! let evaluator = Evaluator::for_nodes(&state);
//! assert!(evaluator.is_satisfied(&node).unwrap());
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;

use super::completion::CompletionSource;
use super::node::{NodeKind, RequirementNode};
use super::program::{Program, ProgramKind};
use crate::error::{PlannerError, Result};

static EMPTY_PROGRAM: Program = Program {
    name: String::new(),
    kind: ProgramKind::Major,
    total_credits: 0,
    requirements: Vec::new(),
    footnotes: Vec::new(),
    shared_groups: BTreeMap::new(),
};

/// A configuration problem found while evaluating a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    pub kind: AnomalyKind,
    /// Label of the offending node.
    pub node: String,
}

/// What was wrong with a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnomalyKind {
    /// `courseType` not recognised.
    UnknownKind(String),
    /// Selection count below one.
    InvalidSelectionCount(i64),
    /// Selection with no options.
    EmptySelection,
    /// Regular course without a code.
    MissingCode,
    /// Flexible requirement with neither code nor text.
    MissingIdentifier,
    /// Reference to a shared group that does not exist.
    UndefinedReference(String),
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AnomalyKind::UnknownKind(kind) => {
                write!(f, "unknown requirement type '{}' treated as unsatisfied", kind)
            }
            AnomalyKind::InvalidSelectionCount(count) => write!(
                f,
                "{}: selection count {} is below 1, treated as unsatisfied",
                self.node, count
            ),
            AnomalyKind::EmptySelection => write!(
                f,
                "{}: selection has no options, treated as unsatisfied",
                self.node
            ),
            AnomalyKind::MissingCode => {
                write!(f, "{}: course has no code, treated as unsatisfied", self.node)
            }
            AnomalyKind::MissingIdentifier => write!(
                f,
                "{}: flexible requirement has neither code nor text, treated as unsatisfied",
                self.node
            ),
            AnomalyKind::UndefinedReference(name) => write!(
                f,
                "shared group '{}' is not defined, treated as unsatisfied",
                name
            ),
        }
    }
}

/// Evaluates requirement nodes against a completion snapshot.
///
/// Borrows its inputs immutably and holds no cache. Create one per
/// evaluation pass; the anomaly log accumulates across calls on the same
/// evaluator and is deduplicated.
pub struct Evaluator<'a> {
    pub(super) program: &'a Program,
    source: &'a dyn CompletionSource,
    projected: bool,
    anomalies: RefCell<Vec<Anomaly>>,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator for a program's tree.
    pub fn new(program: &'a Program, source: &'a dyn CompletionSource) -> Self {
        Self {
            program,
            source,
            projected: false,
            anomalies: RefCell::new(Vec::new()),
        }
    }

    /// Create an evaluator for standalone nodes with no shared groups.
    pub fn for_nodes(source: &'a dyn CompletionSource) -> Self {
        Self::new(&EMPTY_PROGRAM, source)
    }

    /// Count planned courses as completed.
    pub fn projected(mut self, projected: bool) -> Self {
        self.projected = projected;
        self
    }

    /// Whether planned courses count as completed.
    pub fn is_projected(&self) -> bool {
        self.projected
    }

    /// The program being evaluated.
    pub fn program(&self) -> &'a Program {
        self.program
    }

    /// Whether `node` is satisfied.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::CyclicRequirement`] when a shared-group
    /// reference is reachable from itself.
    pub fn is_satisfied(&self, node: &RequirementNode) -> Result<bool> {
        self.satisfied(node, &mut Vec::new())
    }

    /// Anomalies recorded so far.
    pub fn anomalies(&self) -> Vec<Anomaly> {
        self.anomalies.borrow().clone()
    }

    /// Drain the anomaly log.
    pub fn take_anomalies(&self) -> Vec<Anomaly> {
        self.anomalies.take()
    }

    /// Whether a single completion key counts as done.
    pub fn has(&self, key: &str) -> bool {
        self.source.is_completed(key) || (self.projected && self.source.is_planned(key))
    }

    pub(super) fn satisfied(&self, node: &RequirementNode, stack: &mut Vec<String>) -> Result<bool> {
        match &node.kind {
            NodeKind::Regular(course) => match &course.code {
                Some(code) => Ok(self.has(code)),
                None => {
                    self.record(AnomalyKind::MissingCode, node);
                    Ok(false)
                }
            },
            NodeKind::Flexible(_) => match node.completion_key() {
                Some(key) => Ok(self.has(key.as_str())),
                None => {
                    self.record(AnomalyKind::MissingIdentifier, node);
                    Ok(false)
                }
            },
            NodeKind::AndGroup { children } => {
                // No short-circuit: every branch is walked so cycle detection
                // does not depend on completion state.
                let satisfied = self.count_satisfied(children, stack)?;
                Ok(satisfied == children.len())
            }
            NodeKind::OrGroup { children } => Ok(self.count_satisfied(children, stack)? > 0),
            NodeKind::Selection {
                selection_count,
                options,
            } => {
                let satisfied = self.count_satisfied(options, stack)?;
                if !self.selection_is_valid(node, *selection_count, options) {
                    return Ok(false);
                }
                Ok(satisfied as i64 >= *selection_count)
            }
            NodeKind::Reference { name } => match self.enter(name, node, stack)? {
                Some(target) => {
                    let result = self.satisfied(target, stack);
                    stack.pop();
                    result
                }
                None => Ok(false),
            },
            NodeKind::Unknown { kind } => {
                self.record(AnomalyKind::UnknownKind(kind.clone()), node);
                Ok(false)
            }
        }
    }

    pub(super) fn count_satisfied(
        &self,
        nodes: &[RequirementNode],
        stack: &mut Vec<String>,
    ) -> Result<usize> {
        let mut count = 0;
        for node in nodes {
            if self.satisfied(node, stack)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Check a selection's shape, recording an anomaly when it is malformed.
    pub(super) fn selection_is_valid(
        &self,
        node: &RequirementNode,
        selection_count: i64,
        options: &[RequirementNode],
    ) -> bool {
        if selection_count < 1 {
            self.record(AnomalyKind::InvalidSelectionCount(selection_count), node);
            false
        } else if options.is_empty() {
            self.record(AnomalyKind::EmptySelection, node);
            false
        } else {
            true
        }
    }

    /// Resolve a shared-group reference and push it on the traversal stack.
    ///
    /// Returns `Ok(None)` (after recording an anomaly) when the group does not
    /// exist. The caller must pop the stack after a `Some`.
    pub(super) fn enter(
        &self,
        name: &str,
        node: &RequirementNode,
        stack: &mut Vec<String>,
    ) -> Result<Option<&'a RequirementNode>> {
        if let Some(pos) = stack.iter().position(|n| n == name) {
            let mut cycle: Vec<&str> = stack[pos..].iter().map(String::as_str).collect();
            cycle.push(name);
            return Err(PlannerError::CyclicRequirement {
                cycle: cycle.join(" -> "),
            });
        }

        match self.program.shared_group(name) {
            Some(target) => {
                stack.push(name.to_string());
                Ok(Some(target))
            }
            None => {
                self.record(AnomalyKind::UndefinedReference(name.to_string()), node);
                Ok(None)
            }
        }
    }

    fn record(&self, kind: AnomalyKind, node: &RequirementNode) {
        let anomaly = Anomaly {
            kind,
            node: node.label(),
        };
        let mut anomalies = self.anomalies.borrow_mut();
        if !anomalies.contains(&anomaly) {
            tracing::warn!(program = %self.program.name, "{}", anomaly);
            anomalies.push(anomaly);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::{CompletionState, RequirementCategory};

    fn course(code: &str) -> RequirementNode {
        RequirementNode::course(code, None)
    }

    fn check(node: &RequirementNode, completed: &[&str]) -> bool {
        let state = CompletionState::with_completed(completed.iter().copied());
        Evaluator::for_nodes(&state).is_satisfied(node).unwrap()
    }

    #[test]
    fn regular_matches_code_membership() {
        assert!(check(&course("CS 1331"), &["CS 1331"]));
        assert!(!check(&course("CS 1331"), &["CS 1332"]));
        assert!(!check(&course("CS 1331"), &[]));
    }

    #[test]
    fn flexible_with_code_matches_code() {
        let node = RequirementNode::new(NodeKind::Flexible(crate::requirements::FlexibleRequirement {
            code: Some("HUM 2000".into()),
            text: Some("Humanities elective".into()),
            credits: None,
        }));
        assert!(check(&node, &["HUM 2000"]));
        assert!(!check(&node, &["Humanities elective"]));
    }

    #[test]
    fn flexible_text_only_matches_literal_text() {
        let node = RequirementNode::flexible_text("Free elective");
        assert!(check(&node, &["Free elective"]));
        assert!(!check(&node, &["free elective"]));
    }

    #[test]
    fn and_group_requires_every_child() {
        let node = RequirementNode::all_of(vec![course("A"), course("B")]);
        assert!(check(&node, &["A", "B"]));
        assert!(!check(&node, &["A"]));
    }

    #[test]
    fn empty_and_group_is_vacuously_satisfied() {
        assert!(check(&RequirementNode::all_of(vec![]), &[]));
    }

    #[test]
    fn or_group_requires_any_child() {
        let node = RequirementNode::any_of(vec![course("A"), course("B")]);
        assert!(check(&node, &["B"]));
        assert!(!check(&node, &["C"]));
    }

    #[test]
    fn empty_or_group_is_never_satisfied() {
        assert!(!check(&RequirementNode::any_of(vec![]), &["A"]));
    }

    #[test]
    fn selection_counts_satisfied_options() {
        let node = RequirementNode::select(2, vec![course("A"), course("B"), course("C")]);
        assert!(check(&node, &["A", "C"]));
        assert!(!check(&node, &["A"]));
    }

    #[test]
    fn nested_groups_evaluate_recursively() {
        let node = RequirementNode::all_of(vec![
            course("MATH 1551"),
            RequirementNode::any_of(vec![
                RequirementNode::all_of(vec![course("PHYS 2211"), course("PHYS 2212")]),
                RequirementNode::select(2, vec![course("CHEM 1211"), course("CHEM 1212"), course("BIOS 1107")]),
            ]),
        ]);
        assert!(check(&node, &["MATH 1551", "CHEM 1211", "BIOS 1107"]));
        assert!(!check(&node, &["MATH 1551", "PHYS 2211", "CHEM 1211"]));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let node = RequirementNode::select(1, vec![course("A"), RequirementNode::any_of(vec![course("B")])]);
        let state = CompletionState::with_completed(["B"]);
        let evaluator = Evaluator::for_nodes(&state);
        let first = evaluator.is_satisfied(&node).unwrap();
        let second = evaluator.is_satisfied(&node).unwrap();
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn planned_courses_count_only_when_projected() {
        let mut state = CompletionState::new();
        state.mark_planned("A");
        let node = course("A");
        assert!(!Evaluator::for_nodes(&state).is_satisfied(&node).unwrap());
        assert!(Evaluator::for_nodes(&state)
            .projected(true)
            .is_satisfied(&node)
            .unwrap());
    }

    #[test]
    fn unknown_kind_fails_closed_and_is_recorded() {
        let node = RequirementNode::new(NodeKind::Unknown {
            kind: "lab_block".into(),
        });
        let state = CompletionState::new();
        let evaluator = Evaluator::for_nodes(&state);
        assert!(!evaluator.is_satisfied(&node).unwrap());
        let anomalies = evaluator.anomalies();
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, AnomalyKind::UnknownKind("lab_block".into()));
    }

    #[test]
    fn invalid_selection_count_fails_closed() {
        let node = RequirementNode::select(0, vec![course("A")]);
        let state = CompletionState::with_completed(["A"]);
        let evaluator = Evaluator::for_nodes(&state);
        assert!(!evaluator.is_satisfied(&node).unwrap());
        assert_eq!(
            evaluator.take_anomalies()[0].kind,
            AnomalyKind::InvalidSelectionCount(0)
        );
        assert!(evaluator.anomalies().is_empty());
    }

    #[test]
    fn empty_selection_fails_closed() {
        let node = RequirementNode::select(1, vec![]);
        let state = CompletionState::new();
        let evaluator = Evaluator::for_nodes(&state);
        assert!(!evaluator.is_satisfied(&node).unwrap());
        assert_eq!(evaluator.anomalies()[0].kind, AnomalyKind::EmptySelection);
    }

    #[test]
    fn malformed_node_does_not_poison_siblings() {
        let node = RequirementNode::any_of(vec![
            RequirementNode::new(NodeKind::Unknown { kind: "x".into() }),
            course("A"),
        ]);
        assert!(check(&node, &["A"]));
    }

    #[test]
    fn course_without_code_is_recorded() {
        let node = RequirementNode::new(NodeKind::Regular(Default::default()));
        let state = CompletionState::new();
        let evaluator = Evaluator::for_nodes(&state);
        assert!(!evaluator.is_satisfied(&node).unwrap());
        assert_eq!(evaluator.anomalies()[0].kind, AnomalyKind::MissingCode);
    }

    #[test]
    fn anomalies_are_deduplicated() {
        let node = RequirementNode::new(NodeKind::Unknown { kind: "x".into() });
        let state = CompletionState::new();
        let evaluator = Evaluator::for_nodes(&state);
        evaluator.is_satisfied(&node).unwrap();
        evaluator.is_satisfied(&node).unwrap();
        assert_eq!(evaluator.anomalies().len(), 1);
    }

    fn program_with_shared(shared: Vec<(&str, RequirementNode)>, top: RequirementNode) -> Program {
        let mut program = Program::new("Test", 120, vec![RequirementCategory::new("Core", vec![top])]);
        for (name, node) in shared {
            program.shared_groups.insert(name.to_string(), node);
        }
        program
    }

    #[test]
    fn references_resolve_shared_groups() {
        let program = program_with_shared(
            vec![("labs", RequirementNode::all_of(vec![course("PHYS 2211"), course("PHYS 2212")]))],
            RequirementNode::reference("labs"),
        );
        let state = CompletionState::with_completed(["PHYS 2211", "PHYS 2212"]);
        let evaluator = Evaluator::new(&program, &state);
        let top = &program.requirements[0].courses[0];
        assert!(evaluator.is_satisfied(top).unwrap());
    }

    #[test]
    fn undefined_reference_fails_closed() {
        let program = program_with_shared(vec![], RequirementNode::reference("missing"));
        let state = CompletionState::new();
        let evaluator = Evaluator::new(&program, &state);
        let top = &program.requirements[0].courses[0];
        assert!(!evaluator.is_satisfied(top).unwrap());
        assert_eq!(
            evaluator.anomalies()[0].kind,
            AnomalyKind::UndefinedReference("missing".into())
        );
    }

    #[test]
    fn reference_cycle_is_an_error() {
        let program = program_with_shared(
            vec![
                ("a", RequirementNode::any_of(vec![course("X"), RequirementNode::reference("b")])),
                ("b", RequirementNode::all_of(vec![RequirementNode::reference("a")])),
            ],
            RequirementNode::reference("a"),
        );
        let state = CompletionState::with_completed(["X"]);
        let evaluator = Evaluator::new(&program, &state);
        let top = &program.requirements[0].courses[0];
        match evaluator.is_satisfied(top) {
            Err(PlannerError::CyclicRequirement { cycle }) => assert_eq!(cycle, "a -> b -> a"),
            other => panic!("Expected cycle error, got {:?}", other),
        }
    }

    #[test]
    fn self_reference_is_an_error() {
        let program = program_with_shared(
            vec![("loop", RequirementNode::reference("loop"))],
            RequirementNode::reference("loop"),
        );
        let state = CompletionState::new();
        let evaluator = Evaluator::new(&program, &state);
        let top = &program.requirements[0].courses[0];
        assert!(matches!(
            evaluator.is_satisfied(top),
            Err(PlannerError::CyclicRequirement { .. })
        ));
    }

    #[test]
    fn same_group_referenced_twice_is_not_a_cycle() {
        let program = program_with_shared(
            vec![("calc", course("MATH 1551"))],
            RequirementNode::all_of(vec![
                RequirementNode::reference("calc"),
                RequirementNode::reference("calc"),
            ]),
        );
        let state = CompletionState::with_completed(["MATH 1551"]);
        let evaluator = Evaluator::new(&program, &state);
        let top = &program.requirements[0].courses[0];
        assert!(evaluator.is_satisfied(top).unwrap());
    }

    #[test]
    fn anomaly_messages_name_the_node() {
        let anomaly = Anomaly {
            kind: AnomalyKind::EmptySelection,
            node: "1 of 0 (sci)".into(),
        };
        assert!(anomaly.to_string().contains("1 of 0 (sci)"));
        assert!(anomaly.to_string().contains("no options"));
    }
}
