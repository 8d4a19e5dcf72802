//! Circular shared group detection.
//!
//! Shared groups may reference each other. A group that can reach itself
//! through references makes every node pointing into the cycle unevaluable.

use std::collections::{BTreeSet, HashSet};

use crate::lint::{LintDiagnostic, LintRule, RuleId, Severity};
use crate::requirements::{NodeKind, NodePath, Program, RequirementNode};

/// Detects reference cycles between shared groups.
pub struct CircularGroupRefRule;

impl LintRule for CircularGroupRefRule {
    fn id(&self) -> RuleId {
        RuleId::new("circular-group-ref")
    }

    fn name(&self) -> &str {
        "Circular Group Reference"
    }

    fn description(&self) -> &str {
        "Detects shared groups that reference themselves directly or indirectly"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, program: &Program) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();
        let mut reported = HashSet::new();

        for name in program.shared_groups.keys() {
            if let Some(cycle) = self.find_cycle(program, name) {
                // Report each cycle once, whichever member finds it first.
                let cycle_key = {
                    let mut members: Vec<&String> = cycle.iter().collect();
                    members.sort();
                    members.dedup();
                    members
                        .into_iter()
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(",")
                };
                if reported.insert(cycle_key) {
                    diagnostics.push(
                        LintDiagnostic::new(
                            self.id(),
                            self.default_severity(),
                            format!("Circular group reference: {}", cycle.join(" -> ")),
                        )
                        .with_path(NodePath::shared(&cycle[0])),
                    );
                }
            }
        }

        diagnostics
    }
}

impl CircularGroupRefRule {
    fn find_cycle(&self, program: &Program, start: &str) -> Option<Vec<String>> {
        let mut visited = HashSet::new();
        let mut path = Vec::new();
        self.dfs(program, start, &mut visited, &mut path)
    }

    fn dfs(
        &self,
        program: &Program,
        current: &str,
        visited: &mut HashSet<String>,
        path: &mut Vec<String>,
    ) -> Option<Vec<String>> {
        if let Some(pos) = path.iter().position(|n| n == current) {
            let mut cycle = path[pos..].to_vec();
            cycle.push(current.to_string());
            return Some(cycle);
        }
        if visited.contains(current) {
            return None;
        }

        visited.insert(current.to_string());
        path.push(current.to_string());

        if let Some(group) = program.shared_group(current) {
            let mut targets = BTreeSet::new();
            collect_references(group, &mut targets);
            for target in targets {
                if let Some(cycle) = self.dfs(program, target, visited, path) {
                    return Some(cycle);
                }
            }
        }

        path.pop();
        None
    }
}

/// Names referenced anywhere under `node`, without following them.
fn collect_references<'a>(node: &'a RequirementNode, out: &mut BTreeSet<&'a str>) {
    if let NodeKind::Reference { name } = &node.kind {
        out.insert(name.as_str());
    }
    for child in node.children() {
        collect_references(child, out);
    }
}
