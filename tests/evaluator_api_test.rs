//! Integration tests for requirement evaluation through the public API.

use std::collections::BTreeSet;

use degreeplan::requirements::{
    CompletionState, Evaluator, Program, RequirementCategory, RequirementNode,
};
use degreeplan::PlannerError;

fn course(code: &str) -> RequirementNode {
    RequirementNode::course(code, None)
}

fn completed(codes: &[&str]) -> BTreeSet<String> {
    codes.iter().map(|c| c.to_string()).collect()
}

fn satisfied(node: &RequirementNode, codes: &[&str]) -> bool {
    let state = completed(codes);
    Evaluator::for_nodes(&state).is_satisfied(node).unwrap()
}

fn single_category(nodes: Vec<RequirementNode>) -> Program {
    Program::new("Test", 120, vec![RequirementCategory::new("Core", nodes)])
}

#[test]
fn regular_is_completed_set_membership() {
    let node = course("CS 1331");
    assert!(satisfied(&node, &["CS 1331"]));
    assert!(!satisfied(&node, &["CS 1332"]));
    assert!(!satisfied(&node, &[]));
}

#[test]
fn and_group_needs_every_child() {
    let node = RequirementNode::all_of(vec![course("A"), course("B")]);
    assert!(satisfied(&node, &["A", "B"]));
    assert!(!satisfied(&node, &["A"]));
}

#[test]
fn empty_and_group_is_vacuously_true() {
    assert!(satisfied(&RequirementNode::all_of(vec![]), &[]));
}

#[test]
fn or_group_needs_any_child_and_empty_is_false() {
    let node = RequirementNode::any_of(vec![course("A"), course("B")]);
    assert!(satisfied(&node, &["B"]));
    assert!(!satisfied(&node, &[]));
    assert!(!satisfied(&RequirementNode::any_of(vec![]), &["A"]));
}

#[test]
fn selection_two_of_three() {
    let node = RequirementNode::select(2, vec![course("A"), course("B"), course("C")]);
    assert!(satisfied(&node, &["A", "C"]));
    assert!(!satisfied(&node, &["B"]));
}

#[test]
fn evaluation_is_idempotent() {
    let node = RequirementNode::select(
        1,
        vec![RequirementNode::all_of(vec![course("A"), course("B")]), course("C")],
    );
    let state = completed(&["A", "B"]);
    let evaluator = Evaluator::for_nodes(&state);
    let first = evaluator.is_satisfied(&node).unwrap();
    let second = evaluator.is_satisfied(&node).unwrap();
    assert_eq!(first, second);
    assert!(first);
}

#[test]
fn category_with_regular_and_partial_and_group_is_67_percent() {
    let program = single_category(vec![
        course("A"),
        RequirementNode::all_of(vec![course("B"), course("C")]),
    ]);
    let state = CompletionState::with_completed(["A", "B"]);

    let progress = Evaluator::new(&program, &state)
        .category_progress(&program.requirements[0])
        .unwrap();

    assert_eq!(progress.total_units, 3);
    assert_eq!(progress.completed_units, 2);
    assert_eq!(progress.percentage, 67);
}

#[test]
fn program_percentage_counts_complete_categories() {
    let categories = vec![
        RequirementCategory::new("One", vec![course("A")]),
        RequirementCategory::new("Two", vec![course("B")]),
        RequirementCategory::new("Three", vec![course("C")]),
        RequirementCategory::new("Four", vec![course("D"), course("E")]),
    ];
    let program = Program::new("Test", 120, categories);
    let state = CompletionState::with_completed(["A", "B", "C", "D"]);

    let progress = Evaluator::new(&program, &state).program_progress().unwrap();

    assert_eq!(progress.complete_category_count, 3);
    assert_eq!(progress.total_category_count, 4);
    assert_eq!(progress.overall_percentage, 75);
    assert_eq!(progress.categories[3].percentage, 50);
}

#[test]
fn credits_sum_satisfied_leaves_with_default() {
    let program = single_category(vec![
        RequirementNode::course("A", Some(4)),
        RequirementNode::course("B", None),
        RequirementNode::course("C", Some(5)),
    ]);
    let state = CompletionState::with_completed(["A", "B"]);

    let credits = Evaluator::new(&program, &state).credits_summary().unwrap();

    assert_eq!(credits.completed_credits, 7);
    assert_eq!(credits.total_credits, 120);
}

#[test]
fn selection_contributes_partial_units() {
    let node = RequirementNode::select(2, vec![course("A"), course("B"), course("C")]);
    let program = single_category(vec![node.clone()]);
    let state = CompletionState::with_completed(["A"]);
    let evaluator = Evaluator::new(&program, &state);

    assert!(!evaluator.is_satisfied(&node).unwrap());
    let units = evaluator.node_progress(&node).unwrap();
    assert_eq!(units.completed_units, 1);
    assert_eq!(units.total_units, 2);
}

#[test]
fn planned_courses_count_only_when_projected() {
    let program = single_category(vec![course("A")]);
    let mut state = CompletionState::new();
    state.mark_planned("A");

    let actual = Evaluator::new(&program, &state).program_progress().unwrap();
    let projected = Evaluator::new(&program, &state)
        .projected(true)
        .program_progress()
        .unwrap();

    assert_eq!(actual.categories[0].percentage, 0);
    assert_eq!(projected.categories[0].percentage, 100);
}

#[test]
fn reference_cycle_is_an_error() {
    let mut program = single_category(vec![RequirementNode::reference("a")]);
    program
        .shared_groups
        .insert("a".to_string(), RequirementNode::reference("b"));
    program
        .shared_groups
        .insert("b".to_string(), RequirementNode::reference("a"));
    let state = CompletionState::new();

    let err = Evaluator::new(&program, &state)
        .program_progress()
        .unwrap_err();

    match err {
        PlannerError::CyclicRequirement { cycle } => assert_eq!(cycle, "a -> b -> a"),
        other => panic!("Expected CyclicRequirement, got {:?}", other),
    }
}

#[test]
fn malformed_nodes_fail_closed_with_anomalies() {
    let program = single_category(vec![
        RequirementNode::select(0, vec![course("A")]),
        RequirementNode::reference("missing"),
        course("A"),
    ]);
    let state = CompletionState::with_completed(["A"]);
    let evaluator = Evaluator::new(&program, &state);

    let progress = evaluator.program_progress().unwrap();

    assert_eq!(progress.categories[0].completed_units, 1);
    assert_eq!(progress.categories[0].total_units, 3);
    assert_eq!(evaluator.anomalies().len(), 2);
}

#[test]
fn text_only_flexible_is_keyed_by_text() {
    let node = RequirementNode::flexible_text("Any approved humanities course");
    assert!(satisfied(&node, &["Any approved humanities course"]));
    assert!(!satisfied(&node, &["HUM 1000"]));
}
